//! Card record and issuing defaults.

use eazybank_core::audit::Audit;

/// Type of every new card.
pub const CREDIT_CARD: &str = "Credit Card";

/// Limit of every new card.
pub const NEW_CARD_LIMIT: i32 = 100_000;

/// Name stamped into audit columns.
pub const AUDITOR: &str = "CARDS_MS";

/// Lowest generated card number (12 digits).
pub const CARD_NUMBER_BASE: i64 = 100_000_000_000;

/// Width of the generated card number range.
pub const CARD_NUMBER_SPAN: i64 = 900_000_000;

/// A customer's card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Assigned by the database; 0 until inserted.
    pub card_id: i64,
    /// Owner's mobile number. One card per number.
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
    /// Created/updated stamps.
    pub audit: Audit,
}
