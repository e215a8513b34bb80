//! Custom Axum extractors.
//!
//! - [`CorrelationId`]: the request's correlation id
//! - [`ValidatedJson`] / [`ValidatedQuery`]: deserialize, then run
//!   [`Validate`]; failures answer 400
//! - [`MobileNumberQuery`]: the `?mobileNumber=` parameter shared by the
//!   fetch and delete endpoints
//!
//! # Examples
//!
//! ```ignore
//! async fn create(
//!     State(service): State<Arc<AccountService>>,
//!     correlation_id: CorrelationId,
//!     ValidatedJson(customer): ValidatedJson<CustomerDto>,
//! ) -> Result<impl IntoResponse, AppError> {
//!     tracing::info!(correlation_id = %correlation_id.0, "Creating account");
//!     service.create_account(customer).await?;
//!     Ok(ResponseDto::created("Account"))
//! }
//! ```

use crate::{
    error::AppError,
    middleware::{RequestCorrelationId, header_correlation_id},
};
use axum::{
    Json, async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use eazybank_core::validation::{Validate, ValidationErrors, check_mobile_number};
use serde::{Deserialize, de::DeserializeOwned};
use uuid::Uuid;

/// Correlation ID for request tracing.
///
/// Taken from the correlation middleware if it ran, otherwise from the
/// `eazybank-correlation-id` header, otherwise a fresh UUID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(RequestCorrelationId(id)) = parts.extensions.get::<RequestCorrelationId>() {
            return Ok(Self(id.clone()));
        }

        let correlation_id = header_correlation_id(&parts.headers)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Ok(Self(correlation_id))
    }
}

/// JSON body that passed [`Validate`].
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Query string that passed [`Validate`].
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// `?mobileNumber=` query parameter.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MobileNumberQuery {
    /// Empty or 10 digits.
    pub mobile_number: String,
}

impl Validate for MobileNumberQuery {
    fn validate_into(&self, errors: &mut ValidationErrors) {
        check_mobile_number(errors, "mobileNumber", &self.mobile_number);
    }
}
