//! Field validation for incoming DTOs.
//!
//! DTOs implement [`Validate`] by running the checks below against each of
//! their fields. All failures are collected (not just the first) so that a
//! client gets every problem in one 400 response, keyed by field name.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Message used for every mobile number check.
pub const MOBILE_NUMBER_MESSAGE: &str = "Mobile number must be 10 digits";

/// Field name to message map of validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    /// Create an empty set of errors.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field`. The first message for a field wins.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    /// True if nothing failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Message recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Iterate over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns the collected errors if any check failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Types that can check their own fields.
pub trait Validate {
    /// Add every failing field of `self` to `errors`.
    fn validate_into(&self, errors: &mut ValidationErrors);

    /// Run all checks.
    ///
    /// # Errors
    ///
    /// Returns every failing field if any check fails.
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.validate_into(&mut errors);
        errors.into_result()
    }
}

/// True if `value` is exactly `len` ASCII digits.
#[must_use]
pub fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// Mobile numbers are either empty or exactly 10 digits.
#[must_use]
pub fn is_valid_mobile_number(value: &str) -> bool {
    value.is_empty() || is_digits(value, 10)
}

/// Syntactic email check: one `@`, a non-empty local part without spaces and a
/// dotted domain whose labels are non-empty.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || value.chars().any(char::is_whitespace) {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

/// Check a mobile number field.
pub fn check_mobile_number(errors: &mut ValidationErrors, field: &str, value: &str) {
    if !is_valid_mobile_number(value) {
        errors.add(field, MOBILE_NUMBER_MESSAGE);
    }
}

/// Check that a field is present and not blank.
pub fn check_not_empty(errors: &mut ValidationErrors, field: &str, label: &str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, format!("{label} can not be a null or empty"));
    }
}

/// Check an exact-length numeric identifier, e.g. a 12 digit card number.
pub fn check_digits(errors: &mut ValidationErrors, field: &str, label: &str, value: &str, len: usize) {
    if value.trim().is_empty() {
        errors.add(field, format!("{label} can not be a null or empty"));
    } else if !is_digits(value, len) {
        errors.add(field, format!("{label} must be {len} digits"));
    }
}

/// Check a strictly positive amount.
pub fn check_positive(errors: &mut ValidationErrors, field: &str, message: &str, value: i32) {
    if value <= 0 {
        errors.add(field, message);
    }
}

/// Check an amount that may be zero.
pub fn check_non_negative(errors: &mut ValidationErrors, field: &str, message: &str, value: i32) {
    if value < 0 {
        errors.add(field, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn mobile_number_accepts_empty_and_ten_digits() {
        assert!(is_valid_mobile_number(""));
        assert!(is_valid_mobile_number("1234567890"));
        assert!(!is_valid_mobile_number("123456789"));
        assert!(!is_valid_mobile_number("12345678901"));
        assert!(!is_valid_mobile_number("12345abcde"));
    }

    #[test]
    fn email_checks() {
        assert!(is_valid_email("olegmongol@gmail.com"));
        assert!(is_valid_email("a.b+c@mail.example.org"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email("user@example..com"));
        assert!(!is_valid_email("us er@example.com"));
    }

    #[test]
    fn first_message_per_field_wins() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "first");
        errors.add("name", "second");
        assert_eq!(errors.get("name"), Some("first"));
        assert_eq!(errors.to_string(), "name: first");
    }

    #[test]
    fn check_digits_distinguishes_empty_from_malformed() {
        let mut errors = ValidationErrors::new();
        check_digits(&mut errors, "cardNumber", "CardNumber", "", 12);
        check_digits(&mut errors, "loanNumber", "LoanNumber", "12ab", 12);
        assert_eq!(
            errors.get("cardNumber"),
            Some("CardNumber can not be a null or empty")
        );
        assert_eq!(errors.get("loanNumber"), Some("LoanNumber must be 12 digits"));
    }

    proptest! {
        #[test]
        fn any_ten_digit_string_is_a_mobile_number(s in "[0-9]{10}") {
            prop_assert!(is_valid_mobile_number(&s));
        }

        #[test]
        fn other_lengths_are_rejected(s in "[0-9]{1,9}|[0-9]{11,15}") {
            prop_assert!(!is_valid_mobile_number(&s));
        }
    }
}
