//! JSON shapes of the accounts API and of the cards/loans responses it
//! aggregates.

use eazybank_core::validation::{
    Validate, ValidationErrors, check_mobile_number, check_not_empty, is_valid_email,
};
use serde::{Deserialize, Serialize};

/// Account part of a [`CustomerDto`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountsDto {
    /// 10 digit account number.
    pub account_number: i64,
    /// e.g. "Savings"
    pub account_type: String,
    /// Branch postal address.
    pub branch_address: String,
}

/// Customer with an optional account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// 10 digit mobile number.
    pub mobile_number: String,
    /// Present on fetch; on update it selects the account to change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accounts_dto: Option<AccountsDto>,
}

/// A card as returned by the cards service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardsDto {
    /// Owner's mobile number.
    pub mobile_number: String,
    /// 12 digit card number.
    pub card_number: String,
    /// e.g. "Credit Card"
    pub card_type: String,
    /// Credit limit.
    pub total_limit: i32,
    /// Amount spent.
    pub amount_used: i32,
    /// Amount left.
    pub available_amount: i32,
}

/// A loan as returned by the loans service.
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

/// Everything known about a customer across the three services.
///
/// `cardsDto` and `loansDto` are `null` when the customer has no card or loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetailsDto {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// 10 digit mobile number.
    pub mobile_number: String,
    /// The customer's account.
    pub accounts_dto: Option<AccountsDto>,
    /// The customer's card, if any.
    pub cards_dto: Option<CardsDto>,
    /// The customer's loan, if any.
    pub loans_dto: Option<LoansDto>,
}

impl Validate for CustomerDto {
    fn validate_into(&self, errors: &mut ValidationErrors) {
        check_not_empty(errors, "name", "Name", &self.name);
        let name_len = self.name.chars().count();
        if !self.name.trim().is_empty() && !(3..=30).contains(&name_len) {
            errors.add("name", "The length of the name should be between 3 and 30");
        }

        check_not_empty(errors, "email", "Email", &self.email);
        if !self.email.trim().is_empty() && !is_valid_email(&self.email) {
            errors.add("email", "Email address should be a valid value");
        }

        check_mobile_number(errors, "mobileNumber", &self.mobile_number);

        if let Some(account) = &self.accounts_dto {
            account.validate_into(errors);
        }
    }
}

impl Validate for AccountsDto {
    fn validate_into(&self, errors: &mut ValidationErrors) {
        if !(1_000_000_000..=9_999_999_999).contains(&self.account_number) {
            errors.add("accountsDto.accountNumber", "AccountNumber must be 10 digits");
        }
        check_not_empty(
            errors,
            "accountsDto.accountType",
            "AccountType",
            &self.account_type,
        );
        check_not_empty(
            errors,
            "accountsDto.branchAddress",
            "BranchAddress",
            &self.branch_address,
        );
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    fn customer() -> CustomerDto {
        CustomerDto {
            name: "Madan Reddy".to_string(),
            email: "tutor@eazybytes.com".to_string(),
            mobile_number: "4354437687".to_string(),
            accounts_dto: None,
        }
    }

    #[test]
    fn valid_customer_passes() {
        assert!(customer().validate().is_ok());
    }

    #[test]
    fn every_bad_field_is_reported() {
        let dto = CustomerDto {
            name: "Al".to_string(),
            email: "not-an-email".to_string(),
            mobile_number: "123".to_string(),
            accounts_dto: Some(AccountsDto {
                account_number: 42,
                account_type: String::new(),
                branch_address: "123 Main Street, New York".to_string(),
            }),
        };
        let errors = dto.validate().expect_err("invalid");
        assert_eq!(
            errors.get("name"),
            Some("The length of the name should be between 3 and 30")
        );
        assert_eq!(errors.get("email"), Some("Email address should be a valid value"));
        assert_eq!(errors.get("mobileNumber"), Some("Mobile number must be 10 digits"));
        assert_eq!(
            errors.get("accountsDto.accountNumber"),
            Some("AccountNumber must be 10 digits")
        );
        assert_eq!(
            errors.get("accountsDto.accountType"),
            Some("AccountType can not be a null or empty")
        );
        assert_eq!(errors.get("accountsDto.branchAddress"), None);
    }

    #[test]
    fn empty_name_reports_presence_not_length() {
        let dto = CustomerDto {
            name: String::new(),
            ..customer()
        };
        let errors = dto.validate().expect_err("invalid");
        assert_eq!(errors.get("name"), Some("Name can not be a null or empty"));
    }

    #[test]
    fn camel_case_json() {
        let json = serde_json::to_value(customer()).unwrap_or_default();
        assert_eq!(json["mobileNumber"], "4354437687");
        assert!(json.get("accountsDto").is_none());

        let details = CustomerDetailsDto {
            name: "a".to_string(),
            email: "b".to_string(),
            mobile_number: "c".to_string(),
            accounts_dto: None,
            cards_dto: None,
            loans_dto: None,
        };
        let json = serde_json::to_value(details).unwrap_or_default();
        assert!(json["cardsDto"].is_null());
        assert!(json["loansDto"].is_null());
    }
}
