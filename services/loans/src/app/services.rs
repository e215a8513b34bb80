//! Loan operations.

use crate::domain::{
    AUDITOR, LOAN_NUMBER_BASE, LOAN_NUMBER_SPAN, HOME_LOAN, Loan, NEW_LOAN_AMOUNT,
};
use crate::dto::LoansDto;
use crate::mapper;
use crate::repository::LoanRepository;
use eazybank_core::audit::Audit;
use eazybank_core::environment::{Clock, NumberGenerator, RandomNumberGenerator, SystemClock};
use eazybank_core::{Result, ServiceError};
use std::sync::Arc;
use tracing::info;

/// Loan bookkeeping.
pub struct LoansService {
    loans: Arc<dyn LoanRepository>,
    clock: Arc<dyn Clock>,
    numbers: Arc<dyn NumberGenerator>,
}

impl LoansService {
    /// Service over `loans` with the system clock and random loan numbers.
    #[must_use]
    pub fn new(loans: Arc<dyn LoanRepository>) -> Self {
        Self {
            loans,
            clock: Arc::new(SystemClock),
            numbers: Arc::new(RandomNumberGenerator::new(LOAN_NUMBER_BASE, LOAN_NUMBER_SPAN)),
        }
    }

    /// Replace the clock and loan number source.
    #[must_use]
    pub fn with_environment(mut self, clock: Arc<dyn Clock>, numbers: Arc<dyn NumberGenerator>) -> Self {
        self.clock = clock;
        self.numbers = numbers;
        self
    }

    /// Issue a home loan for `mobile_number`.
    ///
    /// # Errors
    ///
    /// [`ServiceError::AlreadyExists`] if the number already has a loan.
    pub async fn create_loan(&self, mobile_number: &str) -> Result<Loan> {
        if self
            .loans
            .find_by_mobile_number(mobile_number)
            .await?
            .is_some()
        {
            return Err(ServiceError::already_registered("Loan", mobile_number));
        }

        let loan = self
            .loans
            .save(Loan {
                loan_id: 0,
                mobile_number: mobile_number.to_string(),
                loan_number: self.numbers.next_number().to_string(),
                loan_type: HOME_LOAN.to_string(),
                total_loan: NEW_LOAN_AMOUNT,
                amount_paid: 0,
                outstanding_amount: NEW_LOAN_AMOUNT,
                audit: Audit::created(self.clock.as_ref(), AUDITOR),
            })
            .await?;

        metrics::counter!("loans_created_total").increment(1);
        info!(loan_number = %loan.loan_number, "Loan created");
        Ok(loan)
    }

    /// Loan owned by `mobile_number`.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] if there is none.
    pub async fn fetch_loan(&self, mobile_number: &str) -> Result<LoansDto> {
        let loan = self.find(mobile_number).await?;
        Ok(mapper::to_loans_dto(&loan))
    }

    /// Overwrite the loan named by `dto.loan_number`.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] if the loan number is unknown.
    pub async fn update_loan(&self, dto: &LoansDto) -> Result<bool> {
        let mut loan = self
            .loans
            .find_by_loan_number(&dto.loan_number)
            .await?
            .ok_or_else(|| ServiceError::not_found("Loan", "LoanNumber", &dto.loan_number))?;

        mapper::apply_loans_dto(dto, &mut loan);
        loan.audit.touch(self.clock.as_ref(), AUDITOR);
        self.loans.save(loan).await?;
        Ok(true)
    }

    /// Cancel the loan owned by `mobile_number`.
    ///
    /// # Errors
    ///
    /// [`ServiceError::NotFound`] if there is none.
    pub async fn delete_loan(&self, mobile_number: &str) -> Result<bool> {
        let loan = self.find(mobile_number).await?;
        self.loans.delete_by_id(loan.loan_id).await?;
        info!(loan_number = %loan.loan_number, "Loan deleted");
        Ok(true)
    }

    async fn find(&self, mobile_number: &str) -> Result<Loan> {
        self.loans
            .find_by_mobile_number(mobile_number)
            .await?
            .ok_or_else(|| ServiceError::not_found("Loan", "mobileNumber", mobile_number))
    }
}
