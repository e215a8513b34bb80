//! JSON shape of a loan.

use eazybank_core::validation::{
    Validate, ValidationErrors, check_digits, check_non_negative, check_not_empty, check_positive,
};
use serde::{Deserialize, Serialize};

/// A loan as seen by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoansDto {
    /// Borrower's mobile number.
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
}

impl Validate for LoansDto {
    fn validate_into(&self, errors: &mut ValidationErrors) {
        check_digits(errors, "mobileNumber", "MobileNumber", &self.mobile_number, 10);
        check_digits(errors, "loanNumber", "LoanNumber", &self.loan_number, 12);
        check_not_empty(errors, "loanType", "LoanType", &self.loan_type);
        check_positive(
            errors,
            "totalLoan",
            "Total loan amount should be greater than zero",
            self.total_loan,
        );
        check_non_negative(
            errors,
            "amountPaid",
            "Total loan amount paid should be equal or greater than zero",
            self.amount_paid,
        );
        check_non_negative(
            errors,
            "outstandingAmount",
            "Total outstanding amount should be equal or greater than zero",
            self.outstanding_amount,
        );
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    fn loan() -> LoansDto {
        LoansDto {
            mobile_number: "4354437687".to_string(),
            loan_number: "100646930341".to_string(),
            loan_type: "Home Loan".to_string(),
            total_loan: 100_000,
            amount_paid: 0,
            outstanding_amount: 100_000,
        }
    }

    #[test]
    fn valid_loan_passes() {
        assert!(loan().validate().is_ok());
    }

    #[test]
    fn amounts_and_numbers_are_checked() {
        let dto = LoansDto {
            mobile_number: String::new(),
            loan_number: "1234".to_string(),
            loan_type: " ".to_string(),
            total_loan: 0,
            amount_paid: -1,
            outstanding_amount: 0,
        };
        let errors = dto.validate().expect_err("invalid");
        assert_eq!(
            errors.get("mobileNumber"),
            Some("MobileNumber can not be a null or empty")
        );
        assert_eq!(errors.get("loanNumber"), Some("LoanNumber must be 12 digits"));
        assert_eq!(errors.get("loanType"), Some("LoanType can not be a null or empty"));
        assert_eq!(
            errors.get("totalLoan"),
            Some("Total loan amount should be greater than zero")
        );
        assert_eq!(
            errors.get("amountPaid"),
            Some("Total loan amount paid should be equal or greater than zero")
        );
        assert_eq!(errors.get("outstandingAmount"), None);
    }
}
