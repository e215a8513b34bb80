//! Account CRUD endpoints.
//!
//! - `POST /api/create`
//! - `GET /api/fetch?mobileNumber=`
//! - `PUT /api/update`
//! - `DELETE /api/delete?mobileNumber=`

use crate::app::AccountService;
use crate::dto::CustomerDto;
use axum::{Json, extract::State};
use eazybank_web::{
    CorrelationId, MobileNumberQuery, ResponseDto, ValidatedJson, ValidatedQuery, WebResult,
};
use std::sync::Arc;

/// Create a customer and their account.
pub async fn create_account(
    State(service): State<Arc<AccountService>>,
    CorrelationId(correlation_id): CorrelationId,
    ValidatedJson(customer): ValidatedJson<CustomerDto>,
) -> WebResult<ResponseDto> {
    service.create_account(&customer, &correlation_id).await?;
    Ok(ResponseDto::created("Account"))
}

/// Customer and account for a mobile number.
pub async fn fetch_account(
    State(service): State<Arc<AccountService>>,
    ValidatedQuery(query): ValidatedQuery<MobileNumberQuery>,
) -> WebResult<Json<CustomerDto>> {
    Ok(Json(service.fetch_account(&query.mobile_number).await?))
}

/// Update account and customer details.
pub async fn update_account(
    State(service): State<Arc<AccountService>>,
    ValidatedJson(customer): ValidatedJson<CustomerDto>,
) -> WebResult<ResponseDto> {
    let updated = service.update_account(&customer).await?;
    Ok(ResponseDto::for_update(updated))
}

/// Delete a customer and their account.
pub async fn delete_account(
    State(service): State<Arc<AccountService>>,
    ValidatedQuery(query): ValidatedQuery<MobileNumberQuery>,
) -> WebResult<ResponseDto> {
    let deleted = service.delete_account(&query.mobile_number).await?;
    Ok(ResponseDto::for_delete(deleted))
}
