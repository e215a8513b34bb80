//! In-memory loan repository with call counters.

use super::LoanRepository;
use crate::domain::Loan;
use async_trait::async_trait;
use eazybank_core::Result;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Loans keyed by id. Ids are assigned from 1 on insert.
#[derive(Debug, Default)]
pub struct InMemoryLoanRepository {
    loans: RwLock<BTreeMap<i64, Loan>>,
    saves: AtomicUsize,
    deletes: AtomicUsize,
}

impl InMemoryLoanRepository {
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
}

#[async_trait]
impl LoanRepository for InMemoryLoanRepository {
    async fn find_by_mobile_number(&self, mobile_number: &str) -> Result<Option<Loan>> {
        Ok(self
            .loans
            .read()
            .await
            .values()
            .find(|c| c.mobile_number == mobile_number)
            .cloned())
    }

    async fn find_by_loan_number(&self, loan_number: &str) -> Result<Option<Loan>> {
        Ok(self
            .loans
            .read()
            .await
            .values()
            .find(|c| c.loan_number == loan_number)
            .cloned())
    }

    async fn save(&self, mut loan: Loan) -> Result<Loan> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        let mut loans = self.loans.write().await;
        if loan.loan_id == 0 {
            loan.loan_id = loans.keys().next_back().map_or(1, |last| last + 1);
        }
        loans.insert(loan.loan_id, loan.clone());
        Ok(loan)
    }

    async fn delete_by_id(&self, loan_id: i64) -> Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.loans.write().await.remove(&loan_id);
        Ok(())
    }
}
