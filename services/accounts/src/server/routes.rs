//! Router for the accounts service.

use super::state::AppState;
use crate::api::{accounts, customers};
use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use eazybank_web::handlers::health::{health_check, readiness_check};
use eazybank_web::handlers::info::{build_info, contact_info};
use eazybank_web::{api_path, correlation_id_layer};
use tower_http::trace::TraceLayer;

/// Build the router: `/health`, `/ready` and the `/api` endpoints.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/create", post(accounts::create_account))
        .route("/fetch", get(accounts::fetch_account))
        .route("/update", put(accounts::update_account))
        .route("/delete", delete(accounts::delete_account))
        .route(
            "/fetchCustomerDetails",
            get(customers::fetch_customer_details),
        )
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
