//! `GET /api/fetchCustomerDetails?mobileNumber=`

use crate::app::CustomerService;
use crate::dto::CustomerDetailsDto;
use axum::{Json, extract::State};
use eazybank_web::{CorrelationId, MobileNumberQuery, ValidatedQuery, WebResult};
use std::sync::Arc;

/// Account, card and loan details of one customer.
pub async fn fetch_customer_details(
    State(service): State<Arc<CustomerService>>,
    CorrelationId(correlation_id): CorrelationId,
    ValidatedQuery(query): ValidatedQuery<MobileNumberQuery>,
) -> WebResult<Json<CustomerDetailsDto>> {
    tracing::debug!(%correlation_id, "fetchCustomerDetails method start");
    let details = service
        .fetch_customer_details(&query.mobile_number, &correlation_id)
        .await?;
    tracing::debug!(%correlation_id, "fetchCustomerDetails method end");
    Ok(Json(details))
}
