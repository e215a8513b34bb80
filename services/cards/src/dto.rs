//! JSON shape of a card.

use eazybank_core::validation::{
    Validate, ValidationErrors, check_digits, check_non_negative, check_not_empty, check_positive,
};
use serde::{Deserialize, Serialize};

/// A card as seen by clients.
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

impl Validate for CardsDto {
    fn validate_into(&self, errors: &mut ValidationErrors) {
        check_digits(errors, "mobileNumber", "MobileNumber", &self.mobile_number, 10);
        check_digits(errors, "cardNumber", "CardNumber", &self.card_number, 12);
        check_not_empty(errors, "cardType", "CardType", &self.card_type);
        check_positive(
            errors,
            "totalLimit",
            "Total card limit should be greater than zero",
            self.total_limit,
        );
        check_non_negative(
            errors,
            "amountUsed",
            "Total amount used should be equal or greater than zero",
            self.amount_used,
        );
        check_non_negative(
            errors,
            "availableAmount",
            "Total available amount should be equal or greater than zero",
            self.available_amount,
        );
    }
}
