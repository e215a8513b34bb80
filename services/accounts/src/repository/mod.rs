//! Storage traits for customers and accounts.
//!
//! [`postgres`] is used by the server binary; [`memory`] backs the service
//! and HTTP tests.

pub mod memory;
pub mod postgres;

use crate::domain::{Account, Customer};
use async_trait::async_trait;
use eazybank_core::{Result, ServiceError};

/// Error for a generated account number that is already in use.
pub(crate) fn account_number_taken(account_number: i64) -> ServiceError {
    ServiceError::AlreadyExists(format!(
        "Account already registered with given accountNumber {account_number}"
    ))
}

pub use memory::{InMemoryAccountRepository, InMemoryCustomerRepository};
pub use postgres::{PostgresAccountRepository, PostgresCustomerRepository};

/// Customer storage.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Customer registered under `mobile_number`.
    async fn find_by_mobile_number(&self, mobile_number: &str) -> Result<Option<Customer>>;

    /// Customer with the given id.
    async fn find_by_id(&self, customer_id: i64) -> Result<Option<Customer>>;

    /// Insert when `customer_id` is 0, otherwise update. Returns the stored
    /// row with its id.
    async fn save(&self, customer: Customer) -> Result<Customer>;

    /// Remove a customer. Missing ids are ignored.
    async fn delete_by_id(&self, customer_id: i64) -> Result<()>;
}

/// Account storage.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Account owned by `customer_id`.
    async fn find_by_customer_id(&self, customer_id: i64) -> Result<Option<Account>>;

    /// Account with the given number.
    async fn find_by_account_number(&self, account_number: i64) -> Result<Option<Account>>;

    /// Store a new account.
    ///
    /// Fails with `ServiceError::AlreadyExists` if the account number is
    /// taken; the existing row is left as it was.
    async fn insert(&self, account: Account) -> Result<Account>;

    /// Insert or replace by account number.
    async fn save(&self, account: Account) -> Result<Account>;

    /// Remove the accounts of a customer.
    async fn delete_by_customer_id(&self, customer_id: i64) -> Result<()>;
}
