//! Shared state for the API service

use crate::api::client::QuoteFetcher;
use crate::db::Db;
use crate::security::{HashingManager, TokenManager};
use std::sync::Arc;

/// Everything API handlers need: storage, credential tooling, and the
/// client for the internal stock service
pub struct ApiState {
    pub db: Arc<Db>,
    pub hashing: HashingManager,
    pub tokens: TokenManager,
    pub fetcher: Arc<dyn QuoteFetcher>,
}
