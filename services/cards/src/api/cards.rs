//! Card CRUD endpoints.

use crate::app::CardsService;
use crate::dto::CardsDto;
use axum::{Json, extract::State};
use eazybank_web::{
    CorrelationId, MobileNumberQuery, ResponseDto, ValidatedJson, ValidatedQuery, WebResult,
};
use std::sync::Arc;

/// `POST /api/create?mobileNumber=`
pub async fn create_card(
    State(service): State<Arc<CardsService>>,
    ValidatedQuery(query): ValidatedQuery<MobileNumberQuery>,
) -> WebResult<ResponseDto> {
    service.create_card(&query.mobile_number).await?;
    Ok(ResponseDto::created("Card"))
}

/// `GET /api/fetch?mobileNumber=`
pub async fn fetch_card(
    State(service): State<Arc<CardsService>>,
    CorrelationId(correlation_id): CorrelationId,
    ValidatedQuery(query): ValidatedQuery<MobileNumberQuery>,
) -> WebResult<Json<CardsDto>> {
    tracing::debug!("eazyBank-correlation-id found: {correlation_id}");
    Ok(Json(service.fetch_card(&query.mobile_number).await?))
}

/// `PUT /api/update`
pub async fn update_card(
    State(service): State<Arc<CardsService>>,
    ValidatedJson(card): ValidatedJson<CardsDto>,
) -> WebResult<ResponseDto> {
    Ok(ResponseDto::for_update(service.update_card(&card).await?))
}

/// `DELETE /api/delete?mobileNumber=`
pub async fn delete_card(
    State(service): State<Arc<CardsService>>,
    ValidatedQuery(query): ValidatedQuery<MobileNumberQuery>,
) -> WebResult<ResponseDto> {
    Ok(ResponseDto::for_delete(
        service.delete_card(&query.mobile_number).await?,
    ))
}
