//! The [`EventHandler`] trait consumed by [`crate::EventConsumer`].
//!
//! Handlers receive the whole [`SerializedEvent`] envelope so they can check
//! the event type and pick up the correlation id before decoding.
//!
//! ```rust,ignore
//! #[async_trait]
//! impl EventHandler for CommunicationSentHandler {
//!     async fn handle(&self, event: &SerializedEvent) -> Result<(), HandlerError> {
//!         let sent: CommunicationSent = event.decode(COMMUNICATION_SENT)?;
//!         self.service.update_communication_status(sent.account_number).await?;
//!         Ok(())
//!     }
//! }
//! ```

use async_trait::async_trait;
use eazybank_core::event::SerializedEvent;

/// Error type returned by handlers. Logged by the consumer, never fatal.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Processes events delivered by an [`crate::EventConsumer`].
///
/// Errors are logged and the consumer moves on to the next event, so a
/// handler that must not lose an event has to deal with failure itself.
#[async_trait]
pub trait EventHandler: Send + Sync + 'static {
    /// Handle one event.
    ///
    /// # Errors
    ///
    /// Decoding failures, business errors, infrastructure failures.
    async fn handle(&self, event: &SerializedEvent) -> Result<(), HandlerError>;
}
