//! HTTP clients for the cards and loans services.
//!
//! Both call `GET {base}/api/fetch?mobileNumber=…` and forward the caller's
//! correlation id. A 404 means the customer has no card (or loan) and maps to
//! `None`; any other failure is a [`ServiceError::Downstream`].

use crate::dto::{CardsDto, LoansDto};
use async_trait::async_trait;
use eazybank_core::{Result, ServiceError};
use eazybank_web::CORRELATION_ID_HEADER;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// Cards service.
#[async_trait]
pub trait CardsClient: Send + Sync {
    /// The customer's card, or `None` if they have none.
    async fn fetch_card_details(
        &self,
        correlation_id: &str,
        mobile_number: &str,
    ) -> Result<Option<CardsDto>>;
}

/// Loans service.
#[async_trait]
pub trait LoansClient: Send + Sync {
    /// The customer's loan, or `None` if they have none.
    async fn fetch_loan_details(
        &self,
        correlation_id: &str,
        mobile_number: &str,
    ) -> Result<Option<LoansDto>>;
}

/// [`CardsClient`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCardsClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCardsClient {
    /// Talk to the cards service at `base_url`.
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl CardsClient for HttpCardsClient {
    async fn fetch_card_details(
        &self,
        correlation_id: &str,
        mobile_number: &str,
    ) -> Result<Option<CardsDto>> {
        fetch(&self.http, "cards", &self.base_url, correlation_id, mobile_number).await
    }
}

/// [`LoansClient`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpLoansClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpLoansClient {
    /// Talk to the loans service at `base_url`.
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl LoansClient for HttpLoansClient {
    async fn fetch_loan_details(
        &self,
        correlation_id: &str,
        mobile_number: &str,
    ) -> Result<Option<LoansDto>> {
        fetch(&self.http, "loans", &self.base_url, correlation_id, mobile_number).await
    }
}

async fn fetch<T: DeserializeOwned>(
    http: &reqwest::Client,
    service: &str,
    base_url: &str,
    correlation_id: &str,
    mobile_number: &str,
) -> Result<Option<T>> {
    let url = format!("{}/api/fetch", base_url.trim_end_matches('/'));
    let response = http
        .get(&url)
        .header(CORRELATION_ID_HEADER, correlation_id)
        .query(&[("mobileNumber", mobile_number)])
        .send()
        .await
        .map_err(|e| ServiceError::Downstream(format!("{service}: {e}")))?;

    match response.status() {
        StatusCode::NOT_FOUND => {
            tracing::debug!(service, mobile_number, "Downstream has no record");
            Ok(None)
        }
        status if status.is_success() => response
            .json::<T>()
            .await
            .map(Some)
            .map_err(|e| ServiceError::Downstream(format!("{service}: {e}"))),
        status => Err(ServiceError::Downstream(format!(
            "{service} responded with {status}"
        ))),
    }
}
