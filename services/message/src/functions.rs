//! The notification steps applied to every new account.
//!
//! Nothing is delivered yet: both steps log what they would send.

use eazybank_core::messages::AccountsMessage;
use tracing::info;

/// "Send" the welcome email and pass the message on.
#[must_use]
pub fn email(message: AccountsMessage) -> AccountsMessage {
    info!("Sending email with the details: {message:?}");
    message
}

/// "Send" the welcome SMS and return the account it was about.
#[must_use]
pub fn sms(message: &AccountsMessage) -> i64 {
    info!("Sending sms with the details: {message:?}");
    message.account_number
}

/// `email` then `sms`.
#[must_use]
pub fn email_sms(message: AccountsMessage) -> i64 {
    sms(&email(message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> AccountsMessage {
        AccountsMessage {
            account_number: 1_234_567_890,
            name: "Madan Reddy".to_string(),
            email: "tutor@eazybytes.com".to_string(),
            mobile_number: "4354437687".to_string(),
        }
    }

    #[test]
    fn email_passes_the_message_through() {
        assert_eq!(email(message()), message());
    }

    #[test]
    fn composition_yields_the_account_number() {
        assert_eq!(email_sms(message()), 1_234_567_890);
    }
}
