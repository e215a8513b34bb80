//! Consumer of `AccountsMessage` events.

use crate::functions::email_sms;
use async_trait::async_trait;
use eazybank_core::event::SerializedEvent;
use eazybank_core::event_bus::EventBus;
use eazybank_core::messages::{ACCOUNTS_MESSAGE, AccountsMessage, CommunicationSent};
use eazybank_runtime::{EventHandler, HandlerError};
use std::sync::Arc;

/// Runs the notification steps and answers with a `CommunicationSent` on
/// `reply_topic`.
///
/// The reply keeps the account number as its key and carries the incoming
/// correlation id.
pub struct AccountsMessageHandler {
    event_bus: Arc<dyn EventBus>,
    reply_topic: String,
}

impl AccountsMessageHandler {
    /// Reply on `reply_topic` through `event_bus`.
    #[must_use]
    pub fn new(event_bus: Arc<dyn EventBus>, reply_topic: impl Into<String>) -> Self {
        Self {
            event_bus,
            reply_topic: reply_topic.into(),
        }
    }
}

#[async_trait]
impl EventHandler for AccountsMessageHandler {
    async fn handle(&self, event: &SerializedEvent) -> Result<(), HandlerError> {
        let message: AccountsMessage = event.decode(ACCOUNTS_MESSAGE)?;
        let account_number = email_sms(message);

        let mut reply = SerializedEvent::from_event(&CommunicationSent { account_number })?
            .with_key(account_number.to_string());
        if let Some(correlation_id) = &event.correlation_id {
            reply = reply.with_correlation_id(correlation_id.clone());
        }

        if let Err(e) = self.event_bus.publish(&self.reply_topic, &reply).await {
            metrics::counter!("events_publish_failures_total", "topic" => self.reply_topic.clone())
                .increment(1);
            return Err(e.into());
        }

        metrics::counter!("communications_sent_total").increment(1);
        tracing::info!(account_number, topic = %self.reply_topic, "Communication sent");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use eazybank_core::messages::COMMUNICATION_SENT;
    use eazybank_testing::InMemoryEventBus;

    fn incoming() -> SerializedEvent {
        SerializedEvent::from_event(&AccountsMessage {
            account_number: 1_234_567_890,
            name: "Madan Reddy".to_string(),
            email: "tutor@eazybytes.com".to_string(),
            mobile_number: "4354437687".to_string(),
        })
        .unwrap()
        .with_correlation_id("corr-77")
    }

    #[tokio::test]
    async fn replies_with_communication_sent() {
        let bus = Arc::new(InMemoryEventBus::new());
        let handler = AccountsMessageHandler::new(bus.clone(), "communication-sent");

        handler.handle(&incoming()).await.unwrap();

        let replies = bus.published("communication-sent");
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].key.as_deref(), Some("1234567890"));
        assert_eq!(replies[0].correlation_id.as_deref(), Some("corr-77"));
        let sent: CommunicationSent = replies[0].decode(COMMUNICATION_SENT).unwrap();
        assert_eq!(sent.account_number, 1_234_567_890);
    }

    #[tokio::test]
    async fn other_event_types_are_rejected() {
        let bus = Arc::new(InMemoryEventBus::new());
        let handler = AccountsMessageHandler::new(bus.clone(), "communication-sent");
        let foreign =
            SerializedEvent::from_event(&CommunicationSent { account_number: 1 }).unwrap();

        assert!(handler.handle(&foreign).await.is_err());
        assert_eq!(bus.published_count(), 0);
    }

    #[tokio::test]
    async fn publish_failure_is_reported() {
        let bus = Arc::new(InMemoryEventBus::new());
        bus.set_fail_publishes(true);
        let handler = AccountsMessageHandler::new(bus.clone(), "communication-sent");

        assert!(handler.handle(&incoming()).await.is_err());
    }
}
