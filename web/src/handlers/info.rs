//! `/api/build-info` and `/api/contact-info`.

use crate::config::{ContactInfo, ServiceInfo};
use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

/// Build version as plain text.
#[allow(clippy::unused_async)]
pub async fn build_info(State(info): State<Arc<ServiceInfo>>) -> (StatusCode, String) {
    (StatusCode::OK, info.build_version.clone())
}

/// Contact details as JSON.
#[allow(clippy::unused_async)]
pub async fn contact_info(State(info): State<Arc<ServiceInfo>>) -> (StatusCode, Json<ContactInfo>) {
    (StatusCode::OK, Json(info.contact.clone()))
}
