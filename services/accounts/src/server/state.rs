//! Shared handler state.

use crate::app::{AccountService, CustomerService};
use axum::extract::FromRef;
use eazybank_web::ServiceInfo;
use eazybank_web::handlers::health::Readiness;
use std::sync::Arc;

/// State shared by every handler. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Account CRUD.
    pub accounts: Arc<AccountService>,
    /// Cross-service customer view.
    pub customers: Arc<CustomerService>,
    /// Build and contact details.
    pub info: Arc<ServiceInfo>,
    /// Dependency probes for `/ready`.
    pub readiness: Readiness,
}

impl FromRef<AppState> for Arc<AccountService> {
    fn from_ref(state: &AppState) -> Self {
        state.accounts.clone()
    }
}

impl FromRef<AppState> for Arc<CustomerService> {
    fn from_ref(state: &AppState) -> Self {
        state.customers.clone()
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
