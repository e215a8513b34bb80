//! Customer and account records.

use eazybank_core::audit::Audit;

/// Type given to every new account.
pub const SAVINGS: &str = "Savings";

/// Branch given to every new account.
pub const ADDRESS: &str = "123 Main Street, New York";

/// Name stamped into audit columns.
pub const AUDITOR: &str = "ACCOUNTS_MS";

/// Lowest generated account number.
pub const ACCOUNT_NUMBER_BASE: i64 = 1_000_000_000;

/// Width of the generated account number range.
pub const ACCOUNT_NUMBER_SPAN: i64 = 900_000_000;

/// A bank customer, unique by mobile number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Assigned by the database; 0 until inserted.
    pub customer_id: i64,
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// 10 digit mobile number.
    pub mobile_number: String,
    /// Created/updated stamps.
    pub audit: Audit,
}

/// A customer's account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Primary key, generated by the service.
    pub account_number: i64,
    /// Owning customer.
    pub customer_id: i64,
    /// e.g. "Savings"
    pub account_type: String,
    /// Branch postal address.
    pub branch_address: String,
    /// Set once the customer has been notified about the new account.
    pub communication_sw: bool,
    /// Created/updated stamps.
    pub audit: Audit,
}
