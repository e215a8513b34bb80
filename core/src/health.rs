//! Dependency probes used by the readiness endpoint.

use std::future::Future;
use std::pin::Pin;

/// A dependency that can report whether it is reachable.
pub trait HealthProbe: Send + Sync {
    /// Short name used as the key in the readiness response, e.g. `"database"`.
    fn name(&self) -> &'static str;

    /// Check the dependency.
    ///
    /// # Errors
    ///
    /// Returns a description of the failure if the dependency is unreachable.
    fn check(&self) -> Pin<Box<dyn Future<Output = Result<(), String>> + Send + '_>>;
}
