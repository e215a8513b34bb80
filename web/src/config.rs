//! HTTP server and service information settings.

use eazybank_core::config::{env_lookup, list_or, parse_or, string_or};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

impl ServerConfig {
    /// Load from `HOST`, `PORT` and `SHUTDOWN_TIMEOUT`.
    #[must_use]
    pub fn from_env(default_port: u16) -> Self {
        Self::from_lookup(&env_lookup, default_port)
    }

    /// Load through `lookup`.
    #[must_use]
    pub fn from_lookup<F>(lookup: &F, default_port: u16) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: string_or(lookup, "HOST", "0.0.0.0"),
            port: parse_or(lookup, "PORT", default_port),
            shutdown_timeout: parse_or(lookup, "SHUTDOWN_TIMEOUT", 30),
        }
    }

    /// `host:port`
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Shutdown timeout as a [`Duration`].
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }
}

/// Body of `/api/contact-info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    /// Greeting.
    pub message: String,
    /// `name` and `email` of the owning team.
    pub contact_details: BTreeMap<String, String>,
    /// Phone numbers.
    pub on_call_support: Vec<String>,
}

/// What a service says about itself on `/api/build-info` and `/api/contact-info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    /// Build version string.
    pub build_version: String,
    /// Contact details.
    pub contact: ContactInfo,
}

impl ServiceInfo {
    /// Load with `prefix` (`ACCOUNTS`, `CARDS`, `LOANS`) from the environment.
    #[must_use]
    pub fn from_env(prefix: &str, service: &str) -> Self {
        Self::from_lookup(&env_lookup, prefix, service)
    }

    /// Load through `lookup`. `service` is the display name used in defaults.
    #[must_use]
    pub fn from_lookup<F>(lookup: &F, prefix: &str, service: &str) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lower = service.to_lowercase();
        let mut contact_details = BTreeMap::new();
        contact_details.insert(
            "name".to_string(),
            string_or(
                lookup,
                &format!("{prefix}_CONTACT_NAME"),
                &format!("{service} Developer"),
            ),
        );
        contact_details.insert(
            "email".to_string(),
            string_or(
                lookup,
                &format!("{prefix}_CONTACT_EMAIL"),
                &format!("{lower}@eazybank.com"),
            ),
        );

        Self {
            build_version: string_or(lookup, "BUILD_VERSION", "1.0"),
            contact: ContactInfo {
                message: string_or(
                    lookup,
                    &format!("{prefix}_MESSAGE"),
                    &format!("Welcome to EazyBank {lower} related local APIs"),
                ),
                contact_details,
                on_call_support: list_or(
                    lookup,
                    &format!("{prefix}_ON_CALL_SUPPORT"),
                    &["(555) 555-1234", "(555) 523-1345"],
                ),
            },
        }
    }
}
