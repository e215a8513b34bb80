//! Shared handler state.

use crate::app::LoansService;
use axum::extract::FromRef;
use eazybank_web::ServiceInfo;
use eazybank_web::handlers::Readiness;
use std::sync::Arc;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Loan operations.
    pub loans: Arc<LoansService>,
    /// Build and contact details.
    pub info: Arc<ServiceInfo>,
    /// Dependency probes for `/ready`.
    pub readiness: Readiness,
}

impl FromRef<AppState> for Arc<LoansService> {
    fn from_ref(state: &AppState) -> Self {
        state.loans.clone()
    }
}

impl FromRef<AppState> for Arc<ServiceInfo> {
    fn from_ref(state: &AppState) -> Self {
        state.info.clone()
    }
}

impl FromRef<AppState> for Readiness {
    fn from_ref(state: &AppState) -> Self {
        state.readiness.clone()
    }
}
