//! Status bodies returned by the create/update/delete endpoints.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Status code text for a successful create.
pub const STATUS_201: &str = "201";
/// Status code text for a processed request.
pub const STATUS_200: &str = "200";
/// Message for a processed request.
pub const MESSAGE_200: &str = "Request processed successfully";
/// Status code text for an update or delete that did not happen.
pub const STATUS_417: &str = "417";
/// Message for an update that did not happen.
pub const MESSAGE_417_UPDATE: &str = "Update operation failed. Please try again or contact Dev team";
/// Message for a delete that did not happen.
pub const MESSAGE_417_DELETE: &str = "Delete operation failed. Please try again or contact Dev team";

/// `{ "statusCode": "...", "statusMsg": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDto {
    /// HTTP status as text, e.g. `"201"`.
    pub status_code: String,
    /// Human-readable outcome.
    pub status_msg: String,
}

impl ResponseDto {
    /// Create a response body.
    #[must_use]
    pub fn new(status_code: &str, status_msg: impl Into<String>) -> Self {
        Self {
            status_code: status_code.to_string(),
            status_msg: status_msg.into(),
        }
    }

    /// 201 body, e.g. `"Account created successfully"`.
    #[must_use]
    pub fn created(resource: &str) -> Self {
        Self::new(STATUS_201, format!("{resource} created successfully"))
    }

    /// 200 body.
    #[must_use]
    pub fn processed() -> Self {
        Self::new(STATUS_200, MESSAGE_200)
    }

    /// 417 body for updates.
    #[must_use]
    pub fn update_failed() -> Self {
        Self::new(STATUS_417, MESSAGE_417_UPDATE)
    }

    /// 417 body for deletes.
    #[must_use]
    pub fn delete_failed() -> Self {
        Self::new(STATUS_417, MESSAGE_417_DELETE)
    }

    /// Pick the 200 or 417 update body.
    #[must_use]
    pub fn for_update(updated: bool) -> Self {
        if updated { Self::processed() } else { Self::update_failed() }
    }

    /// Pick the 200 or 417 delete body.
    #[must_use]
    pub fn for_delete(deleted: bool) -> Self {
        if deleted { Self::processed() } else { Self::delete_failed() }
    }
}

impl IntoResponse for ResponseDto {
    fn into_response(self) -> Response {
        let status = self
            .status_code
            .parse::<u16>()
            .ok()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}
