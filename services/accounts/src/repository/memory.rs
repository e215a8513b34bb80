//! In-memory repositories with call counters.

use super::{AccountRepository, CustomerRepository, account_number_taken};
use crate::domain::{Account, Customer};
use async_trait::async_trait;
use eazybank_core::Result;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Customers keyed by id. Ids are assigned from 1 on insert.
#[derive(Debug, Default)]
pub struct InMemoryCustomerRepository {
    customers: RwLock<BTreeMap<i64, Customer>>,
    saves: AtomicUsize,
    deletes: AtomicUsize,
}

impl InMemoryCustomerRepository {
    /// Empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save` calls so far.
    #[must_use]
    pub fn save_calls(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Number of `delete_by_id` calls so far.
    #[must_use]
    pub fn delete_calls(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    /// Number of stored customers.
    pub async fn len(&self) -> usize {
        self.customers.read().await.len()
    }

    /// True when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.customers.read().await.is_empty()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_mobile_number(&self, mobile_number: &str) -> Result<Option<Customer>> {
        Ok(self
            .customers
            .read()
            .await
            .values()
            .find(|c| c.mobile_number == mobile_number)
            .cloned())
    }

    async fn find_by_id(&self, customer_id: i64) -> Result<Option<Customer>> {
        Ok(self.customers.read().await.get(&customer_id).cloned())
    }

    async fn save(&self, mut customer: Customer) -> Result<Customer> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        let mut customers = self.customers.write().await;
        if customer.customer_id == 0 {
            customer.customer_id = customers.keys().next_back().map_or(1, |last| last + 1);
        }
        customers.insert(customer.customer_id, customer.clone());
        Ok(customer)
    }

    async fn delete_by_id(&self, customer_id: i64) -> Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.customers.write().await.remove(&customer_id);
        Ok(())
    }
}

/// Accounts keyed by account number.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<BTreeMap<i64, Account>>,
    saves: AtomicUsize,
    deletes: AtomicUsize,
}

impl InMemoryAccountRepository {
    /// Empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `insert` and `save` calls so far.
    #[must_use]
    pub fn save_calls(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Number of `delete_by_customer_id` calls so far.
    #[must_use]
    pub fn delete_calls(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    /// Number of stored accounts.
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// True when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_customer_id(&self, customer_id: i64) -> Result<Option<Account>> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| a.customer_id == customer_id)
            .cloned())
    }

    async fn find_by_account_number(&self, account_number: i64) -> Result<Option<Account>> {
        Ok(self.accounts.read().await.get(&account_number).cloned())
    }

    async fn insert(&self, account: Account) -> Result<Account> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.account_number) {
            return Err(account_number_taken(account.account_number));
        }
        accounts.insert(account.account_number, account.clone());
        Ok(account)
    }

    async fn save(&self, account: Account) -> Result<Account> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.accounts
            .write()
            .await
            .insert(account.account_number, account.clone());
        Ok(account)
    }

    async fn delete_by_customer_id(&self, customer_id: i64) -> Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.accounts
            .write()
            .await
            .retain(|_, a| a.customer_id != customer_id);
        Ok(())
    }
}
