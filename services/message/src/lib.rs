//! EazyBank message service.
//!
//! ```text
//! send-communication ──► AccountsMessageHandler ──► email ──► sms
//!                                                            │
//! communication-sent ◄───────────────────────────────────────┘
//! ```
//!
//! The only HTTP surface is `/health` and `/ready`.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod functions;
pub mod handler;

use axum::{Router, routing::get};
use eazybank_web::correlation_id_layer;
use eazybank_web::handlers::{Readiness, health_check, readiness_check};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use handler::AccountsMessageHandler;

/// Health and readiness routes.
pub fn build_router() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
        .with_state(Readiness::new())
}
