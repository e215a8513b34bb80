//! Loan storage.

pub mod memory;
pub mod postgres;

use crate::domain::Loan;
use async_trait::async_trait;
use eazybank_core::Result;

pub use memory::InMemoryLoanRepository;
pub use postgres::PostgresLoanRepository;

/// Loan storage.
#[async_trait]
pub trait LoanRepository: Send + Sync {
    /// Loan owned by `mobile_number`.
    async fn find_by_mobile_number(&self, mobile_number: &str) -> Result<Option<Loan>>;

    /// Loan with the given number.
    async fn find_by_loan_number(&self, loan_number: &str) -> Result<Option<Loan>>;

    /// Insert when `loan_id` is 0, otherwise update.
    async fn save(&self, loan: Loan) -> Result<Loan>;

    /// Remove a loan. Missing ids are ignored.
    async fn delete_by_id(&self, loan_id: i64) -> Result<()>;
}
