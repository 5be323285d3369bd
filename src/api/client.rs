//! HTTP client for the internal stock service

use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A quote as returned by the stock service: prices still text,
/// date already an ISO-8601 timestamp
#[derive(Debug, Clone, Deserialize)]
pub struct FetchedQuote {
    pub name: String,
    pub symbol: String,
    pub date: DateTime<Utc>,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
}

/// The service-to-service hop, behind a trait so handlers can be
/// exercised without a live stock service
#[async_trait]
pub trait QuoteFetcher: Send + Sync {
    async fn fetch_quote(&self, symbol: &str) -> Result<FetchedQuote>;
}

/// Real client talking to the stock service over HTTP, unauthenticated
pub struct StockServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl StockServiceClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl QuoteFetcher for StockServiceClient {
    async fn fetch_quote(&self, symbol: &str) -> Result<FetchedQuote> {
        let url = format!("{}/stock", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("s", symbol)])
            .send()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamStatus(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(e.to_string()))
    }
}
