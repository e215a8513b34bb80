//! Messages exchanged between the accounts and message services.

use crate::event::Event;
use serde::{Deserialize, Serialize};

/// Event type of [`AccountsMessage`].
pub const ACCOUNTS_MESSAGE: &str = "AccountsMessage.v1";

/// Event type of [`CommunicationSent`].
pub const COMMUNICATION_SENT: &str = "CommunicationSent.v1";

/// Published by accounts after an account is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountsMessage {
    /// The new account's number.
    pub account_number: i64,
    /// Customer name.
    pub name: String,
    /// Customer email.
    pub email: String,
    /// Customer mobile number.
    pub mobile_number: String,
}

impl Event for AccountsMessage {
    fn event_type(&self) -> &'static str {
        ACCOUNTS_MESSAGE
    }
}

/// Published by the message service once the customer has been notified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationSent {
    /// Account the communication was about.
    pub account_number: i64,
}

impl Event for CommunicationSent {
    fn event_type(&self) -> &'static str {
        COMMUNICATION_SENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::SerializedEvent;

    #[test]
    #[allow(clippy::expect_used)]
    fn accounts_message_survives_the_envelope() {
        let message = AccountsMessage {
            account_number: 1_234_567_890,
            name: "Madan Reddy".to_string(),
            email: "tutor@eazybytes.com".to_string(),
            mobile_number: "4354437687".to_string(),
        };
        let envelope = SerializedEvent::from_event(&message).expect("serialize");
        assert_eq!(envelope.event_type, ACCOUNTS_MESSAGE);

        let decoded: AccountsMessage = envelope.decode(ACCOUNTS_MESSAGE).expect("decode");
        assert_eq!(decoded, message);
        assert!(envelope.decode::<CommunicationSent>(COMMUNICATION_SENT).is_err());
    }
}
