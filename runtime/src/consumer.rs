//! Event bus consumer with automatic reconnection.
//!
//! ```text
//! loop {
//!     subscribe (retry after delay on failure)
//!     for each event:
//!         handler.handle(event), log errors, keep going
//!     stream ended: wait and resubscribe
//! }   // until the shutdown channel fires
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let consumer = EventConsumer::new(
//!     "communication-sent",
//!     vec![config.communication_sent_topic.clone()],
//!     event_bus,
//!     Arc::new(CommunicationSentHandler::new(service)),
//!     shutdown_tx.subscribe(),
//! );
//! let handle = consumer.spawn();
//! ```

use crate::EventHandler;
use eazybank_core::{event::SerializedEvent, event_bus::EventBus};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{Instrument, error, info, warn};

/// Generic event bus consumer.
///
/// Runs until the shutdown channel fires. Handler errors and broken
/// streams are logged; neither stops the consumer.
pub struct EventConsumer {
    /// Consumer name (for logging)
    name: String,

    /// Topics to subscribe to
    topics: Vec<String>,

    /// Event bus to consume from
    event_bus: Arc<dyn EventBus>,

    /// Handler for processing events
    handler: Arc<dyn EventHandler>,

    /// Shutdown signal receiver
    shutdown: broadcast::Receiver<()>,

    /// Retry delay on connection failure (default: 5 seconds)
    retry_delay: Duration,
}

impl EventConsumer {
    /// Create a new event consumer with a 5 second retry delay.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        topics: Vec<String>,
        event_bus: Arc<dyn EventBus>,
        handler: Arc<dyn EventHandler>,
        shutdown: broadcast::Receiver<()>,
    ) -> Self {
        Self {
            name: name.into(),
            topics,
            event_bus,
            handler,
            shutdown,
            retry_delay: Duration::from_secs(5),
        }
    }

    /// Set custom retry delay.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Consumer name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Spawn the consumer as a background task.
    #[must_use]
    pub fn spawn(mut self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    async fn run(&mut self) {
        info!(consumer = %self.name, "Event consumer started");

        loop {
            let topics: Vec<&str> = self.topics.iter().map(String::as_str).collect();

            tokio::select! {
                _ = self.shutdown.recv() => {
                    info!(consumer = %self.name, "Event consumer received shutdown signal");
                    break;
                }
                subscribe_result = self.event_bus.subscribe(&topics) => {
                    match subscribe_result {
                        Ok(mut stream) => {
                            info!(consumer = %self.name, topics = ?self.topics, "Subscribed to event bus");

                            if self.process_stream(&mut stream).await {
                                break;
                            }

                            warn!(consumer = %self.name, "Event stream ended, reconnecting in {:?}", self.retry_delay);
                        }
                        Err(e) => {
                            error!(
                                consumer = %self.name,
                                error = %e,
                                "Failed to subscribe to event bus, retrying in {:?}",
                                self.retry_delay
                            );
                        }
                    }

                    tokio::select! {
                        _ = self.shutdown.recv() => break,
                        () = tokio::time::sleep(self.retry_delay) => {}
                    }
                }
            }
        }

        info!(consumer = %self.name, "Event consumer stopped");
    }

    /// Returns `true` if shutdown was requested, `false` if the stream ended.
    async fn process_stream<S, E>(&mut self, stream: &mut S) -> bool
    where
        S: futures::Stream<Item = Result<SerializedEvent, E>> + Unpin + Send,
        E: std::fmt::Display,
    {
        loop {
            tokio::select! {
                _ = self.shutdown.recv() => {
                    info!(consumer = %self.name, "Event consumer received shutdown signal during processing");
                    return true;
                }
                event_result = stream.next() => {
                    match event_result {
                        Some(Ok(event)) => self.dispatch(&event).await,
                        Some(Err(e)) => {
                            error!(
                                consumer = %self.name,
                                error = %e,
                                "Error receiving event from stream"
                            );
                        }
                        None => return false,
                    }
                }
            }
        }
    }

    async fn dispatch(&self, event: &SerializedEvent) {
        let span = tracing::info_span!(
            "handle_event",
            consumer = %self.name,
            event_type = %event.event_type,
            correlation_id = event.correlation_id.as_deref().unwrap_or(""),
        );

        if let Err(e) = self.handler.handle(event).instrument(span).await {
            error!(
                consumer = %self.name,
                event_type = %event.event_type,
                error = %e,
                "Failed to handle event"
            );
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::HandlerError;
    use async_trait::async_trait;
    use eazybank_testing::InMemoryEventBus;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl EventHandler for Recorder {
        async fn handle(&self, event: &SerializedEvent) -> Result<(), HandlerError> {
            self.seen
                .lock()
                .map_err(|e| e.to_string())?
                .push(event.event_type.clone());
            if event.event_type == "Bad.v1" {
                return Err("cannot handle".into());
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn handles_events_until_shutdown() {
        let bus = Arc::new(InMemoryEventBus::new());
        let recorder = Arc::new(Recorder::default());
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let handle = EventConsumer::new(
            "test",
            vec!["topic".to_string()],
            bus.clone(),
            recorder.clone(),
            shutdown_rx,
        )
        .with_retry_delay(Duration::from_millis(10))
        .spawn();

        // Wait for the subscription before publishing.
        tokio::time::sleep(Duration::from_millis(50)).await;
        for event_type in ["Bad.v1", "Good.v1"] {
            let event = SerializedEvent::new(event_type.to_string(), vec![]);
            bus.publish("topic", &event).await.expect("publish");
        }

        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        while recorder.seen.lock().expect("lock").len() < 2 {
            assert!(tokio::time::Instant::now() < deadline, "events not handled");
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        shutdown_tx.send(()).expect("consumer is listening");
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("consumer stops")
            .expect("task did not panic");

        assert_eq!(
            *recorder.seen.lock().expect("lock"),
            vec!["Bad.v1".to_string(), "Good.v1".to_string()]
        );
    }
}
