//! Application error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Detail message returned to callers for any failure while talking to the
/// stock service (covers both the non-2xx and the unreachable case).
pub const UPSTREAM_DETAIL: &str = "An error occurred while retrieving stock data.";

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Timestamp parse error: {0}")]
    DateParse(#[from] chrono::ParseError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Permission denied: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Stock service returned status {0}")]
    UpstreamStatus(u16),

    #[error("Stock service unreachable: {0}")]
    UpstreamUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::UpstreamStatus(_) => (StatusCode::NOT_FOUND, UPSTREAM_DETAIL.to_string()),
            AppError::UpstreamUnavailable(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_DETAIL.to_string())
            }
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error.".to_string(),
            ),
        };

        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
