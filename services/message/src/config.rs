//! Message service configuration.

use eazybank_core::config::env_lookup;
use eazybank_redpanda::RedpandaConfig;
use eazybank_web::ServerConfig;

/// Broker and HTTP settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Broker, consumer group and topics.
    pub redpanda: RedpandaConfig,
    /// Health endpoint bind address.
    pub server: ServerConfig,
}

impl Config {
    /// Load from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(&env_lookup)
    }

    /// Load through `lookup`.
    #[must_use]
    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            redpanda: RedpandaConfig::from_lookup(lookup, "message"),
            server: ServerConfig::from_lookup(lookup, 9010),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::from_lookup(&|_: &str| None);
        assert_eq!(config.redpanda.consumer_group, "message");
        assert_eq!(config.redpanda.send_communication_topic, "send-communication");
        assert_eq!(config.server.port, 9010);
    }
}
