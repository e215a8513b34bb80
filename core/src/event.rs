//! Event trait and the serialized wire format used on the event bus.
//!
//! Events are serialized with `bincode`. Producers and consumers in this
//! workspace are all Rust services, so they share the binary layout.
//!
//! # Example
//!
//! ```
//! use eazybank_core::event::Event;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Clone, Debug, Serialize, Deserialize)]
//! struct CardIssued {
//!     card_number: String,
//! }
//!
//! impl Event for CardIssued {
//!     fn event_type(&self) -> &'static str {
//!         "CardIssued.v1"
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt;
use thiserror::Error;

/// Error types for event operations.
#[derive(Error, Debug)]
pub enum EventError {
    /// Failed to serialize event to bytes.
    #[error("Failed to serialize event: {0}")]
    SerializationError(String),

    /// Failed to deserialize event from bytes.
    #[error("Failed to deserialize event: {0}")]
    DeserializationError(String),

    /// The serialized event carries a different type than the one requested.
    #[error("Unexpected event type: expected {expected}, got {actual}")]
    UnexpectedEventType {
        /// The type the caller asked for
        expected: &'static str,
        /// The type found on the wire
        actual: String,
    },
}

/// A message that can be published on the event bus.
///
/// The `event_type()` string identifies the payload on the wire and should
/// carry a version suffix (`"AccountsMessage.v1"`), so that consumers can
/// reject payloads they do not understand.
pub trait Event: Send + Sync + 'static {
    /// Returns the event type identifier for this event.
    fn event_type(&self) -> &'static str;

    /// Serialize this event to bincode bytes.
    ///
    /// # Errors
    ///
    /// Returns `EventError::SerializationError` if the event cannot be serialized.
    fn to_bytes(&self) -> Result<Vec<u8>, EventError>
    where
        Self: Serialize,
    {
        bincode::serialize(self).map_err(|e| EventError::SerializationError(e.to_string()))
    }

    /// Deserialize an event from bincode bytes.
    ///
    /// # Errors
    ///
    /// Returns `EventError::DeserializationError` if the bytes are corrupted or
    /// belong to a different event schema.
    fn from_bytes(bytes: &[u8]) -> Result<Self, EventError>
    where
        Self: DeserializeOwned + Sized,
    {
        bincode::deserialize(bytes).map_err(|e| EventError::DeserializationError(e.to_string()))
    }
}

/// A serialized event ready for the bus.
///
/// This is the envelope that travels through Redpanda: the event type name,
/// the bincode payload, an optional partition key and the correlation id of
/// the request that caused it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedEvent {
    /// The event type identifier (e.g., "AccountsMessage.v1").
    pub event_type: String,

    /// The bincode-serialized event data.
    pub data: Vec<u8>,

    /// Partition key. Events sharing a key keep their relative order.
    pub key: Option<String>,

    /// Correlation id of the HTTP request that produced the event.
    pub correlation_id: Option<String>,
}

impl SerializedEvent {
    /// Create a new serialized event.
    #[must_use]
    pub const fn new(event_type: String, data: Vec<u8>) -> Self {
        Self {
            event_type,
            data,
            key: None,
            correlation_id: None,
        }
    }

    /// Create a serialized event from an [`Event`].
    ///
    /// # Errors
    ///
    /// Returns `EventError::SerializationError` if the event cannot be serialized.
    ///
    /// # Examples
    ///
    /// ```
    /// use eazybank_core::event::SerializedEvent;
    /// use eazybank_core::messages::CommunicationSent;
    ///
    /// let event = CommunicationSent { account_number: 1_234_567_890 };
    /// let serialized = SerializedEvent::from_event(&event).unwrap();
    /// assert_eq!(serialized.event_type, "CommunicationSent.v1");
    /// ```
    pub fn from_event<E: Event + Serialize>(event: &E) -> Result<Self, EventError> {
        Ok(Self::new(event.event_type().to_string(), event.to_bytes()?))
    }

    /// Set the partition key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the correlation id.
    #[must_use]
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    /// Decode the payload as `E`, checking the event type first.
    ///
    /// `expected` is the type string `E` publishes under.
    ///
    /// # Errors
    ///
    /// Returns `EventError::UnexpectedEventType` if the envelope carries another
    /// type, or `EventError::DeserializationError` if the payload is corrupt.
    pub fn decode<E>(&self, expected: &'static str) -> Result<E, EventError>
    where
        E: Event + DeserializeOwned,
    {
        if self.event_type != expected {
            return Err(EventError::UnexpectedEventType {
                expected,
                actual: self.event_type.clone(),
            });
        }
        E::from_bytes(&self.data)
    }
}

impl fmt::Display for SerializedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SerializedEvent {{ type: {}, size: {} bytes }}",
            self.event_type,
            self.data.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
    enum TestEvent {
        Created { id: String, value: i32 },
        Updated { id: String, new_value: i32 },
    }

    impl Event for TestEvent {
        fn event_type(&self) -> &'static str {
            match self {
                TestEvent::Created { .. } => "TestEvent.Created.v1",
                TestEvent::Updated { .. } => "TestEvent.Updated.v1",
            }
        }
    }

    #[test]
    fn event_type_returns_correct_identifier() {
        let event = TestEvent::Created {
            id: "test-1".to_string(),
            value: 42,
        };
        assert_eq!(event.event_type(), "TestEvent.Created.v1");
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn serialized_event_carries_key_and_correlation() {
        let event = TestEvent::Updated {
            id: "test-1".to_string(),
            new_value: 100,
        };

        let serialized = SerializedEvent::from_event(&event)
            .expect("serialization should succeed")
            .with_key("1234567890")
            .with_correlation_id("corr-456");

        assert_eq!(serialized.event_type, "TestEvent.Updated.v1");
        assert!(!serialized.data.is_empty());
        assert_eq!(serialized.key.as_deref(), Some("1234567890"));
        assert_eq!(serialized.correlation_id.as_deref(), Some("corr-456"));
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn decode_rejects_foreign_event_type() {
        let event = TestEvent::Created {
            id: "a".to_string(),
            value: 1,
        };
        let serialized = SerializedEvent::from_event(&event).expect("serialize");

        let err = serialized
            .decode::<TestEvent>("TestEvent.Updated.v1")
            .expect_err("type mismatch must fail");
        assert!(matches!(err, EventError::UnexpectedEventType { .. }));

        let decoded = serialized
            .decode::<TestEvent>("TestEvent.Created.v1")
            .expect("matching type decodes");
        assert_eq!(decoded, event);
    }

    #[test]
    fn serialized_event_display() {
        let serialized = SerializedEvent::new("TestEvent.v1".to_string(), vec![1, 2, 3, 4, 5]);

        let display = format!("{serialized}");
        assert!(display.contains("TestEvent.v1"));
        assert!(display.contains("5 bytes"));
    }
}
