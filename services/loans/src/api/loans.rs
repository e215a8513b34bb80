//! Loan CRUD endpoints.

use crate::app::LoansService;
use crate::dto::LoansDto;
use axum::{Json, extract::State};
use eazybank_web::{
    CorrelationId, MobileNumberQuery, ResponseDto, ValidatedJson, ValidatedQuery, WebResult,
};
use std::sync::Arc;

/// `POST /api/create?mobileNumber=`
pub async fn create_loan(
    State(service): State<Arc<LoansService>>,
    ValidatedQuery(query): ValidatedQuery<MobileNumberQuery>,
) -> WebResult<ResponseDto> {
    service.create_loan(&query.mobile_number).await?;
    Ok(ResponseDto::created("Loan"))
}

/// `GET /api/fetch?mobileNumber=`
pub async fn fetch_loan(
    State(service): State<Arc<LoansService>>,
    CorrelationId(correlation_id): CorrelationId,
    ValidatedQuery(query): ValidatedQuery<MobileNumberQuery>,
) -> WebResult<Json<LoansDto>> {
    tracing::debug!(%correlation_id, mobile_number = %query.mobile_number, "Fetching loan");
    Ok(Json(service.fetch_loan(&query.mobile_number).await?))
}

/// `PUT /api/update`
pub async fn update_loan(
    State(service): State<Arc<LoansService>>,
    ValidatedJson(loan): ValidatedJson<LoansDto>,
) -> WebResult<ResponseDto> {
    Ok(ResponseDto::for_update(service.update_loan(&loan).await?))
}

/// `DELETE /api/delete?mobileNumber=`
pub async fn delete_loan(
    State(service): State<Arc<LoansService>>,
    ValidatedQuery(query): ValidatedQuery<MobileNumberQuery>,
) -> WebResult<ResponseDto> {
    Ok(ResponseDto::for_delete(
        service.delete_loan(&query.mobile_number).await?,
    ))
}
