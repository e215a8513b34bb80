//! Broker and topic settings.

use eazybank_core::config::{env_lookup, string_or};
use serde::{Deserialize, Serialize};

/// Default topic accounts publishes new-account notifications to.
pub const DEFAULT_SEND_COMMUNICATION_TOPIC: &str = "send-communication";

/// Default topic the message service answers on.
pub const DEFAULT_COMMUNICATION_SENT_TOPIC: &str = "communication-sent";

/// RedPanda/Kafka configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedpandaConfig {
    /// Broker addresses (comma-separated)
    pub brokers: String,
    /// Consumer group for this service
    pub consumer_group: String,
    /// Producer acks: "0", "1" or "all"
    pub producer_acks: String,
    /// Compression codec
    pub compression: String,
    /// Where a new consumer group starts reading
    pub auto_offset_reset: String,
    /// Topic carrying `AccountsMessage`
    pub send_communication_topic: String,
    /// Topic carrying `CommunicationSent`
    pub communication_sent_topic: String,
}

impl RedpandaConfig {
    /// Load from the environment. `default_group` names the consumer group
    /// when `CONSUMER_GROUP` is unset.
    #[must_use]
    pub fn from_env(default_group: &str) -> Self {
        Self::from_lookup(&env_lookup, default_group)
    }

    /// Load through `lookup`.
    #[must_use]
    pub fn from_lookup<F>(lookup: &F, default_group: &str) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            brokers: string_or(lookup, "REDPANDA_BROKERS", "localhost:9092"),
            consumer_group: string_or(lookup, "CONSUMER_GROUP", default_group),
            producer_acks: string_or(lookup, "REDPANDA_PRODUCER_ACKS", "all"),
            compression: string_or(lookup, "REDPANDA_COMPRESSION", "none"),
            auto_offset_reset: string_or(lookup, "REDPANDA_AUTO_OFFSET_RESET", "earliest"),
            send_communication_topic: string_or(
                lookup,
                "SEND_COMMUNICATION_TOPIC",
                DEFAULT_SEND_COMMUNICATION_TOPIC,
            ),
            communication_sent_topic: string_or(
                lookup,
                "COMMUNICATION_SENT_TOPIC",
                DEFAULT_COMMUNICATION_SENT_TOPIC,
            ),
        }
    }
}
