//! # EazyBank Testing
//!
//! Test doubles for the environment traits in `eazybank-core`:
//!
//! - [`FixedClock`] / [`test_clock`]: deterministic time
//! - [`SequentialNumberGenerator`]: predictable account, card and loan numbers
//! - [`InMemoryEventBus`]: records published events and feeds subscribers
//!
//! ## Example
//!
//! ```ignore
//! use eazybank_testing::{InMemoryEventBus, SequentialNumberGenerator, test_clock};
//!
//! #[tokio::test]
//! async fn creates_an_account() {
//!     let bus = Arc::new(InMemoryEventBus::new());
//!     let service = AccountService::new(customers, accounts, bus.clone(), "send-communication")
//!         .with_environment(
//!             Arc::new(test_clock()),
//!             Arc::new(SequentialNumberGenerator::starting_at(1_000_000_000)),
//!         );
//!     service.create_account(&dto, "corr-1").await?;
//!     assert_eq!(bus.published("send-communication").len(), 1);
//! }
//! ```

/// Mock implementations for testing.
pub mod mocks {
    use chrono::{DateTime, Utc};
    use eazybank_core::environment::{Clock, NumberGenerator};
    use eazybank_core::event::SerializedEvent;
    use eazybank_core::event_bus::{EventBus, EventBusError, EventStream};
    use futures::stream::{self, StreamExt};
    use std::collections::HashMap;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
    use std::sync::Mutex;
    use tokio::sync::broadcast;

    /// Fixed clock for deterministic tests
    ///
    /// # Example
    ///
    /// ```
    /// use eazybank_testing::mocks::FixedClock;
    /// use eazybank_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded timestamp fails to parse, which cannot happen.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    /// Hands out `start`, `start + 1`, `start + 2`, ...
    #[derive(Debug)]
    pub struct SequentialNumberGenerator {
        next: AtomicI64,
    }

    impl SequentialNumberGenerator {
        /// First number returned is `start`.
        #[must_use]
        pub const fn starting_at(start: i64) -> Self {
            Self {
                next: AtomicI64::new(start),
            }
        }
    }

    impl NumberGenerator for SequentialNumberGenerator {
        fn next_number(&self) -> i64 {
            self.next.fetch_add(1, Ordering::SeqCst)
        }
    }

    /// In-process [`EventBus`].
    ///
    /// Every published event is kept for assertions and also broadcast to
    /// current subscribers of its topic. Subscribers only see events published
    /// after they subscribed.
    #[derive(Debug)]
    pub struct InMemoryEventBus {
        published: Mutex<Vec<(String, SerializedEvent)>>,
        channels: Mutex<HashMap<String, broadcast::Sender<SerializedEvent>>>,
        fail_publishes: AtomicBool,
    }

    impl Default for InMemoryEventBus {
        fn default() -> Self {
            Self::new()
        }
    }

    impl InMemoryEventBus {
        /// Create an empty bus.
        #[must_use]
        pub fn new() -> Self {
            Self {
                published: Mutex::new(Vec::new()),
                channels: Mutex::new(HashMap::new()),
                fail_publishes: AtomicBool::new(false),
            }
        }

        /// Make every subsequent publish fail (or succeed again).
        pub fn set_fail_publishes(&self, fail: bool) {
            self.fail_publishes.store(fail, Ordering::SeqCst);
        }

        /// Events published to `topic`, in order.
        #[must_use]
        pub fn published(&self, topic: &str) -> Vec<SerializedEvent> {
            self.published
                .lock()
                .map(|log| {
                    log.iter()
                        .filter(|(t, _)| t == topic)
                        .map(|(_, e)| e.clone())
                        .collect()
                })
                .unwrap_or_default()
        }

        /// Number of events published across all topics.
        #[must_use]
        pub fn published_count(&self) -> usize {
            self.published.lock().map(|log| log.len()).unwrap_or(0)
        }

        fn sender(&self, topic: &str) -> Option<broadcast::Sender<SerializedEvent>> {
            let mut channels = self.channels.lock().ok()?;
            Some(
                channels
                    .entry(topic.to_string())
                    .or_insert_with(|| broadcast::channel(256).0)
                    .clone(),
            )
        }
    }

    impl EventBus for InMemoryEventBus {
        fn publish(
            &self,
            topic: &str,
            event: &SerializedEvent,
        ) -> Pin<Box<dyn Future<Output = Result<(), EventBusError>> + Send + '_>> {
            let topic = topic.to_string();
            let event = event.clone();

            Box::pin(async move {
                if self.fail_publishes.load(Ordering::SeqCst) {
                    return Err(EventBusError::PublishFailed {
                        topic,
                        reason: "publishing disabled".to_string(),
                    });
                }

                let Some(sender) = self.sender(&topic) else {
                    return Err(EventBusError::TransportError("bus lock poisoned".to_string()));
                };
                if let Ok(mut log) = self.published.lock() {
                    log.push((topic, event.clone()));
                }
                // No subscribers is not an error.
                let _ = sender.send(event);
                Ok(())
            })
        }

        fn subscribe(
            &self,
            topics: &[&str],
        ) -> Pin<Box<dyn Future<Output = Result<EventStream, EventBusError>> + Send + '_>> {
            let topics: Vec<String> = topics.iter().map(|s| (*s).to_string()).collect();

            Box::pin(async move {
                let mut streams = Vec::with_capacity(topics.len());
                for topic in &topics {
                    let sender =
                        self.sender(topic)
                            .ok_or_else(|| EventBusError::SubscriptionFailed {
                                topics: topics.clone(),
                                reason: "bus lock poisoned".to_string(),
                            })?;
                    let mut rx = sender.subscribe();
                    streams.push(Box::pin(async_stream::stream! {
                        loop {
                            match rx.recv().await {
                                Ok(event) => yield Ok(event),
                                Err(broadcast::error::RecvError::Lagged(_)) => {}
                                Err(broadcast::error::RecvError::Closed) => break,
                            }
                        }
                    }));
                }

                Ok(stream::select_all(streams).boxed() as EventStream)
            })
        }
    }
}

pub use mocks::{FixedClock, InMemoryEventBus, SequentialNumberGenerator, test_clock};

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use eazybank_core::environment::{Clock, NumberGenerator};
    use eazybank_core::event::SerializedEvent;
    use eazybank_core::event_bus::EventBus;
    use futures::StreamExt;
    use std::time::Duration;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn sequential_numbers() {
        let generator = SequentialNumberGenerator::starting_at(100_000_000_000);
        assert_eq!(generator.next_number(), 100_000_000_000);
        assert_eq!(generator.next_number(), 100_000_000_001);
    }

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let bus = InMemoryEventBus::new();
        let mut stream = bus.subscribe(&["a", "b"]).await.expect("subscribe");

        let event = SerializedEvent::new("X.v1".to_string(), vec![1]);
        bus.publish("b", &event).await.expect("publish");
        bus.publish("c", &event).await.expect("publish");

        let received = tokio::time::timeout(Duration::from_secs(1), stream.next())
            .await
            .expect("timely")
            .expect("some")
            .expect("ok");
        assert_eq!(received, event);
        assert_eq!(bus.published("b").len(), 1);
        assert_eq!(bus.published_count(), 2);
    }

    #[tokio::test]
    async fn publish_can_be_made_to_fail() {
        let bus = InMemoryEventBus::new();
        bus.set_fail_publishes(true);
        let event = SerializedEvent::new("X.v1".to_string(), vec![]);
        assert!(bus.publish("a", &event).await.is_err());
        assert_eq!(bus.published_count(), 0);
    }
}
