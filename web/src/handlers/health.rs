//! Health check endpoints.
//!
//! `/health` is a liveness check that touches nothing. `/ready` runs every
//! registered [`HealthProbe`] and answers 503 if any of them fails.

use axum::{Json, extract::State, http::StatusCode};
use eazybank_core::health::HealthProbe;
use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
}

/// Liveness check.
///
/// ```bash
/// curl http://localhost:8080/health
/// # {"status":"ok","version":"0.1.0"}
/// ```
#[allow(clippy::unused_async)]
pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Probes consulted by [`readiness_check`].
#[derive(Clone, Default)]
pub struct Readiness {
    probes: Vec<Arc<dyn HealthProbe>>,
}

impl Readiness {
    /// No probes: always ready.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a probe.
    #[must_use]
    pub fn with_probe(mut self, probe: Arc<dyn HealthProbe>) -> Self {
        self.probes.push(probe);
        self
    }
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    /// Overall readiness status
    pub ready: bool,
    /// Result per probe
    pub checks: BTreeMap<&'static str, bool>,
}

/// Readiness check.
///
/// ```bash
/// curl http://localhost:8080/ready
/// # {"ready":true,"checks":{"database":true}}
/// ```
pub async fn readiness_check(
    State(readiness): State<Readiness>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let results = join_all(readiness.probes.iter().map(|probe| async move {
        let outcome = probe.check().await;
        if let Err(reason) = &outcome {
            tracing::warn!(probe = probe.name(), %reason, "Readiness probe failed");
        }
        (probe.name(), outcome.is_ok())
    }))
    .await;

    let checks: BTreeMap<&'static str, bool> = results.into_iter().collect();
    let ready = checks.values().all(|ok| *ok);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(ReadinessResponse { ready, checks }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::pin::Pin;

    struct StaticProbe(Result<(), String>);

    impl HealthProbe for StaticProbe {
        fn name(&self) -> &'static str {
            "database"
        }

        fn check(&self) -> Pin<Box<dyn Future<Output = Result<(), String>> + Send + '_>> {
            let outcome = self.0.clone();
            Box::pin(async move { outcome })
        }
    }

    #[tokio::test]
    async fn test_simple_health_check() {
        let (status, Json(body)) = health_check().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.status, "ok");
    }

    #[tokio::test]
    async fn ready_when_all_probes_pass() {
        let readiness = Readiness::new().with_probe(Arc::new(StaticProbe(Ok(()))));
        let (status, Json(body)) = readiness_check(State(readiness)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.ready);
        assert_eq!(body.checks.get("database"), Some(&true));
    }

    #[tokio::test]
    async fn unavailable_when_a_probe_fails() {
        let readiness =
            Readiness::new().with_probe(Arc::new(StaticProbe(Err("refused".to_string()))));
        let (status, Json(body)) = readiness_check(State(readiness)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!body.ready);
    }
}
