//! Router for the cards service.

use super::state::AppState;
use crate::api::cards;
use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use eazybank_web::handlers::{build_info, contact_info, health_check, readiness_check};
use eazybank_web::{api_path, correlation_id_layer};
use tower_http::trace::TraceLayer;

/// Build the router: `/health`, `/ready` and the `/api` endpoints.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/create", post(cards::create_card))
        .route("/fetch", get(cards::fetch_card))
        .route("/update", put(cards::update_card))
        .route("/delete", delete(cards::delete_card))
        .route("/build-info", get(build_info))
        .route("/contact-info", get(contact_info));

    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .nest("/api", api_routes)
        .layer(middleware::from_fn(api_path))
        .layer(TraceLayer::new_for_http())
        .layer(correlation_id_layer())
        .with_state(state)
}
