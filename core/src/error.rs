//! Errors raised by service operations.
//!
//! Every service (accounts, cards, loans) reports failures through
//! [`ServiceError`]. The web layer turns each variant into an HTTP status;
//! see `eazybank_web::error`.

use thiserror::Error;

/// Errors that can occur in service operations.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// A resource keyed by a unique field is already registered.
    #[error("{0}")]
    AlreadyExists(String),

    /// A lookup missed.
    #[error("{resource} not found with the given input data {field} : '{value}'")]
    NotFound {
        /// Resource name, e.g. "Customer"
        resource: &'static str,
        /// Field the lookup used, e.g. "mobileNumber"
        field: &'static str,
        /// The value that was looked up
        value: String,
    },

    /// The storage layer failed.
    #[error("Repository error: {0}")]
    Repository(String),

    /// A call to another service failed.
    #[error("Downstream service error: {0}")]
    Downstream(String),
}

impl ServiceError {
    /// Build a [`ServiceError::NotFound`].
    #[must_use]
    pub fn not_found(resource: &'static str, field: &'static str, value: impl ToString) -> Self {
        Self::NotFound {
            resource,
            field,
            value: value.to_string(),
        }
    }

    /// Build a [`ServiceError::AlreadyExists`] for a resource keyed by mobile number.
    #[must_use]
    pub fn already_registered(resource: &str, mobile_number: &str) -> Self {
        Self::AlreadyExists(format!(
            "{resource} already registered with given mobileNumber {mobile_number}"
        ))
    }

    /// Build the [`ServiceError::AlreadyExists`] raised for a duplicate customer.
    ///
    /// Customers spell the key out ("mobile number"); cards and loans use
    /// [`ServiceError::already_registered`].
    #[must_use]
    pub fn customer_already_registered(mobile_number: &str) -> Self {
        Self::AlreadyExists(format!(
            "Customer already registered with given mobile number {mobile_number}"
        ))
    }
}

/// Result alias used by services and repositories.
pub type Result<T> = std::result::Result<T, ServiceError>;
