//! Error types for web handlers.
//!
//! [`AppError`] bridges [`ServiceError`] and HTTP. Every error answers with
//!
//! ```json
//! {
//!   "apiPath": "uri=/api/fetch",
//!   "errorCode": "NOT_FOUND",
//!   "errorMessage": "Customer not found with the given input data mobileNumber : '1234567890'",
//!   "errorTime": "2025-01-01T12:00:00Z"
//! }
//! ```
//!
//! except validation failures, which answer 400 with a plain
//! `{ "field": "message" }` map. `apiPath` is filled in by
//! [`crate::middleware::api_path`]; without that middleware it is empty.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use eazybank_core::{ServiceError, validation::ValidationErrors};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Application error type for web handlers.
///
/// # Examples
///
/// ```ignore
/// async fn fetch(
///     State(service): State<Arc<AccountService>>,
///     ValidatedQuery(query): ValidatedQuery<MobileNumberQuery>,
/// ) -> Result<Json<CustomerDto>, AppError> {
///     Ok(Json(service.fetch_account(&query.mobile_number).await?))
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error message (user-facing)
    message: String,
    /// Error code (for client error handling)
    code: String,
    /// Per-field validation failures
    fields: Option<ValidationErrors>,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String, code: String) -> Self {
        Self {
            status,
            message,
            code,
            fields: None,
            source: None,
        }
    }

    /// Create a new error with a source error.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Create a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            message.into(),
            "BAD_REQUEST".to_string(),
        )
    }

    /// Create a 404 Not Found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            message.into(),
            "NOT_FOUND".to_string(),
        )
    }

    /// Create a 400 error carrying a field to message map.
    #[must_use]
    pub fn validation(fields: ValidationErrors) -> Self {
        let mut err = Self::new(
            StatusCode::BAD_REQUEST,
            fields.to_string(),
            "BAD_REQUEST".to_string(),
        );
        err.fields = Some(fields);
        err
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            message.into(),
            "INTERNAL_SERVER_ERROR".to_string(),
        )
    }

    /// The HTTP status this error answers with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// The error code, e.g. `"NOT_FOUND"`.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The user-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error response body (JSON).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// `uri=` followed by the request path.
    pub api_path: String,
    /// Error code, e.g. `"BAD_REQUEST"`.
    pub error_code: String,
    /// Human-readable error message.
    pub error_message: String,
    /// When the error was produced.
    pub error_time: DateTime<Utc>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            if let Some(source) = &self.source {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    error = %source,
                    "Internal server error"
                );
            } else {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    "Internal server error"
                );
            }
        }

        if let Some(fields) = self.fields {
            return (self.status, Json(fields)).into_response();
        }

        let body = ErrorResponse {
            api_path: String::new(),
            error_code: self.code,
            error_message: self.message,
            error_time: Utc::now(),
        };

        let mut response = (self.status, Json(body.clone())).into_response();
        // Picked up by the api_path middleware.
        response.extensions_mut().insert(body);
        response
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(err.to_string()).with_source(err)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(fields: ValidationErrors) -> Self {
        Self::validation(fields)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::AlreadyExists(message) => Self::bad_request(message),
            e @ ServiceError::NotFound { .. } => Self::not_found(e.to_string()),
            e @ (ServiceError::Repository(_) | ServiceError::Downstream(_)) => {
                let message = e.to_string();
                Self::internal(message).with_source(anyhow::Error::new(e))
            }
        }
    }
}
