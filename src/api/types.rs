//! API request and response shapes
//!
//! Each endpoint gets its own explicit response struct instead of a shared
//! serializer: the immediate lookup response carries no `date` while history
//! entries do, and null fields vanish from the JSON rather than rendering
//! as `null`.

use crate::db::models::{LookupRecord, SymbolCount};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// User management
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

// ============================================================================
// Tokens
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccessTokenResponse {
    pub access: String,
}

// ============================================================================
// Stock lookup, history, stats
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StockQuery {
    pub s: Option<String>,
}

/// Immediate lookup response. No `date` field: the observed contract is
/// asymmetric with history, and is preserved as-is.
#[derive(Debug, Serialize)]
pub struct StockResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<f64>,
}

/// One entry of a user's lookup history
#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<f64>,
}

impl From<LookupRecord> for HistoryEntry {
    fn from(record: LookupRecord) -> Self {
        Self {
            date: record.date,
            name: record.name,
            symbol: record.symbol,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
        }
    }
}

/// One row of the top-requested-symbols report
#[derive(Debug, Serialize)]
pub struct StatsEntry {
    pub stock: String,
    pub times_requested: i64,
}

impl From<SymbolCount> for StatsEntry {
    fn from(count: SymbolCount) -> Self {
        Self {
            stock: count.symbol,
            times_requested: count.times_requested,
        }
    }
}
