//! Database models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub is_superuser: bool,
    pub created_at: String,
}

/// One persisted lookup. Columns are nullable in the schema, so every field
/// beyond the ids comes back optional; serialization drops the nulls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupRecord {
    pub id: i64,
    pub user_id: i64,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
}

/// Fields for a new lookup row. The date is the quote's own timestamp,
/// not the time the API call was made.
#[derive(Debug, Clone)]
pub struct NewLookup {
    pub symbol: String,
    pub name: String,
    pub date: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Aggregate request counter for one symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolCount {
    pub symbol: String,
    pub times_requested: i64,
}
