//! Stock service endpoint handlers

use crate::error::{AppError, Result};
use crate::upstream::{Quote, QuoteSource};
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state for stock service handlers
pub struct StockState {
    pub source: Arc<dyn QuoteSource>,
}

/// Build the stock service router
pub fn router(state: Arc<StockState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/stock", get(get_stock))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Deserialize)]
struct StockQuery {
    s: Option<String>,
}

/// Wire shape for a fetched quote: prices as the provider's text,
/// date as RFC 3339
#[derive(Debug, Serialize)]
struct QuoteResponse {
    name: String,
    symbol: String,
    date: DateTime<Utc>,
    open: String,
    high: String,
    low: String,
    close: String,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            name: quote.name,
            symbol: quote.symbol,
            date: quote.date,
            open: quote.open,
            high: quote.high,
            low: quote.low,
            close: quote.close,
        }
    }
}

/// Health check endpoint - GET /health
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Quote lookup - GET /stock?s=<symbol>
async fn get_stock(
    State(state): State<Arc<StockState>>,
    Query(query): Query<StockQuery>,
) -> Result<Json<QuoteResponse>> {
    let symbol = match query.s.as_deref() {
        Some(s) if !s.is_empty() => s,
        _ => return Err(AppError::Validation("Missing stock symbol.".to_string())),
    };

    info!("Quote lookup for symbol: {}", symbol);
    let quote = state.source.fetch(symbol).await?;

    Ok(Json(QuoteResponse::from(quote)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::TimeZone;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    struct FakeSource;

    #[async_trait]
    impl QuoteSource for FakeSource {
        async fn fetch(&self, symbol: &str) -> Result<Quote> {
            if symbol == "aapl.us" {
                Ok(Quote {
                    name: "APPLE".to_string(),
                    symbol: "AAPL.US".to_string(),
                    date: Utc.with_ymd_and_hms(2023, 6, 24, 22, 0, 16).unwrap(),
                    open: "123.66".to_string(),
                    high: "123.66".to_string(),
                    low: "122.49".to_string(),
                    close: "123.49".to_string(),
                })
            } else {
                Err(AppError::NotFound("Stock not found.".to_string()))
            }
        }
    }

    fn app() -> Router {
        router(Arc::new(StockState {
            source: Arc::new(FakeSource),
        }))
    }

    async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_quote_lookup() {
        let (status, body) = get("/stock?s=aapl.us").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({
                "name": "APPLE",
                "symbol": "AAPL.US",
                "date": "2023-06-24T22:00:16Z",
                "open": "123.66",
                "high": "123.66",
                "low": "122.49",
                "close": "123.49",
            })
        );
    }

    #[tokio::test]
    async fn test_missing_symbol() {
        let (status, body) = get("/stock").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Missing stock symbol.");
    }

    #[tokio::test]
    async fn test_unknown_symbol() {
        let (status, body) = get("/stock?s=invalid").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Stock not found.");
    }
}
