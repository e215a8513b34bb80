//! Field copies between [`Loan`] and [`LoansDto`].

use crate::domain::Loan;
use crate::dto::LoansDto;

/// Loan entity to its DTO.
#[must_use]
pub fn to_loans_dto(loan: &Loan) -> LoansDto {
    LoansDto {
        mobile_number: loan.mobile_number.clone(),
        loan_number: loan.loan_number.clone(),
        loan_type: loan.loan_type.clone(),
        total_loan: loan.total_loan,
        amount_paid: loan.amount_paid,
        outstanding_amount: loan.outstanding_amount,
    }
}

/// Copy every DTO field onto a loan.
pub fn apply_loans_dto(dto: &LoansDto, loan: &mut Loan) {
    loan.mobile_number.clone_from(&dto.mobile_number);
    loan.loan_number.clone_from(&dto.loan_number);
    loan.loan_type.clone_from(&dto.loan_type);
    loan.total_loan = dto.total_loan;
    loan.amount_paid = dto.amount_paid;
    loan.outstanding_amount = dto.outstanding_amount;
}
