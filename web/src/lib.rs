//! Axum integration shared by the EazyBank services.
//!
//! Each service builds its router from the same pieces:
//!
//! ```text
//! request ──► correlation_id_layer ──► api_path ──► handler
//!                                                     │
//!            ValidatedJson / ValidatedQuery ◄─────────┤
//!            AppError / ResponseDto ◄─────────────────┘
//! ```
//!
//! - [`AppError`] turns a [`eazybank_core::ServiceError`] into the JSON error
//!   body clients expect
//! - [`ResponseDto`] is the `{statusCode, statusMsg}` body of write endpoints
//! - [`middleware`] holds the correlation id layer and the api-path rewrite
//! - [`handlers`] has the health, readiness, build-info and contact-info
//!   endpoints every service exposes

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;

pub use config::{ContactInfo, ServerConfig, ServiceInfo};
pub use error::{AppError, ErrorResponse};
pub use extractors::{CorrelationId, MobileNumberQuery, ValidatedJson, ValidatedQuery};
pub use middleware::{CORRELATION_ID_HEADER, api_path, correlation_id_layer};
pub use response::ResponseDto;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
