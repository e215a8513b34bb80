//! Consumer of `CommunicationSent` events.

use crate::app::AccountService;
use async_trait::async_trait;
use eazybank_core::event::SerializedEvent;
use eazybank_core::messages::{COMMUNICATION_SENT, CommunicationSent};
use eazybank_runtime::{EventHandler, HandlerError};
use std::sync::Arc;
use tracing::info;

/// Switches the communication flag of the account named in each event.
pub struct CommunicationSentHandler {
    service: Arc<AccountService>,
}

impl CommunicationSentHandler {
    /// Handle events with `service`.
    #[must_use]
    pub const fn new(service: Arc<AccountService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl EventHandler for CommunicationSentHandler {
    async fn handle(&self, event: &SerializedEvent) -> Result<(), HandlerError> {
        let sent: CommunicationSent = event.decode(COMMUNICATION_SENT)?;
        info!(
            "Updating Communication status for the account number: {}",
            sent.account_number
        );
        self.service
            .update_communication_status(sent.account_number)
            .await?;
        Ok(())
    }
}
