//! Loan record and issuing defaults.

use eazybank_core::audit::Audit;

/// Type of every new loan.
pub const HOME_LOAN: &str = "Home Loan";

/// Principal of every new loan.
pub const NEW_LOAN_AMOUNT: i32 = 100_000;

/// Name stamped into audit columns.
pub const AUDITOR: &str = "LOANS_MS";

/// Lowest generated loan number (12 digits).
pub const LOAN_NUMBER_BASE: i64 = 100_000_000_000;

/// Width of the generated loan number range.
pub const LOAN_NUMBER_SPAN: i64 = 900_000_000;

/// A customer's loan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loan {
    /// Assigned by the database; 0 until inserted.
    pub loan_id: i64,
    /// Borrower's mobile number. One loan per number.
    pub mobile_number: String,
    /// 12 digit loan number.
    pub loan_number: String,
    /// e.g. "Home Loan"
    pub loan_type: String,
    /// Principal.
    pub total_loan: i32,
    /// Repaid so far.
    pub amount_paid: i32,
    /// Still owed.
    pub outstanding_amount: i32,
    /// Created/updated stamps.
    pub audit: Audit,
}
