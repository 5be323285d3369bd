//! API service endpoint handlers

use crate::api::auth::CurrentUser;
use crate::api::types::*;
use crate::db::models::NewLookup;
use crate::error::{AppError, Result};
use crate::state::ApiState;
use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Build the API service router
pub fn router(state: Arc<ApiState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/token/", post(obtain_token))
        .route("/api/token/refresh/", post(refresh_token))
        .route("/create/", post(create_user))
        .route("/me/", get(me).put(update_me).patch(update_me))
        .route("/stock", get(stock_lookup))
        .route("/history", get(history))
        .route("/stats", get(stats))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint - GET /health
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

// ============================================================================
// User management
// ============================================================================

fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Validation(
            "Enter a valid email address.".to_string(),
        ));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < 5 {
        return Err(AppError::Validation(
            "Ensure the password has at least 5 characters.".to_string(),
        ));
    }
    Ok(())
}

/// Register a new user - POST /create/
async fn create_user(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let email = req
        .email
        .ok_or_else(|| AppError::Validation("Email is required.".to_string()))?;
    validate_email(&email)?;

    let password = req
        .password
        .ok_or_else(|| AppError::Validation("Password is required.".to_string()))?;
    validate_password(&password)?;

    let name = req.name.unwrap_or_default();

    let user = state
        .db
        .create_user(&email, &name, &password, false, &state.hashing)?;
    info!("Created user: {}", user.email);

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            email: user.email,
            name: user.name,
        }),
    ))
}

/// Current user record - GET /me/
async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse {
        email: user.email,
        name: user.name,
    })
}

/// Update the current user - PUT/PATCH /me/
async fn update_me(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>> {
    if let Some(email) = req.email.as_deref() {
        validate_email(email)?;
    }

    let password_hash = match req.password.as_deref() {
        Some(password) => {
            validate_password(password)?;
            Some(state.hashing.hash_password(password)?)
        }
        None => None,
    };

    let updated = state.db.update_user(
        user.id,
        req.email.as_deref(),
        req.name.as_deref(),
        password_hash.as_deref(),
    )?;

    Ok(Json(UserResponse {
        email: updated.email,
        name: updated.name,
    }))
}

// ============================================================================
// Tokens
// ============================================================================

/// Obtain an access/refresh pair - POST /api/token/
async fn obtain_token(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<TokenRequest>,
) -> Result<Json<TokenPairResponse>> {
    let email = req.email.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    let user = state
        .db
        .verify_user(&email, &password, &state.hashing)?
        .ok_or_else(|| {
            AppError::Auth("Unable to authenticate with provided credentials.".to_string())
        })?;

    let pair = state.tokens.issue_pair(user.id)?;
    info!("Issued token pair for user: {}", user.email);

    Ok(Json(TokenPairResponse {
        access: pair.access,
        refresh: pair.refresh,
        email: user.email,
    }))
}

/// Exchange a refresh token for a new access token - POST /api/token/refresh/
async fn refresh_token(
    State(state): State<Arc<ApiState>>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<AccessTokenResponse>> {
    let refresh = req.refresh.unwrap_or_default();
    let access = state.tokens.refresh_access(&refresh)?;
    Ok(Json(AccessTokenResponse { access }))
}

// ============================================================================
// Stock lookup, history, stats
// ============================================================================

fn parse_price(raw: &str) -> Result<f64> {
    raw.parse()
        .map_err(|_| AppError::Internal(format!("Unparseable price field: {}", raw)))
}

/// Authenticated quote lookup - GET /stock?s=<symbol>
///
/// Proxies the stock service, records the lookup against the caller, bumps
/// the symbol's aggregate counter, and answers with the quote minus its date.
async fn stock_lookup(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<StockQuery>,
) -> Result<Json<StockResponse>> {
    let symbol = query.s.unwrap_or_default();
    info!("User {} looking up symbol: {}", user.email, symbol);

    let quote = state.fetcher.fetch_quote(&symbol).await?;

    let lookup = NewLookup {
        symbol: quote.symbol,
        name: quote.name,
        // The quote's own timestamp, not the time of this API call
        date: quote.date,
        open: parse_price(&quote.open)?,
        high: parse_price(&quote.high)?,
        low: parse_price(&quote.low)?,
        close: parse_price(&quote.close)?,
    };

    state.db.insert_lookup(user.id, &lookup)?;
    state.db.record_symbol_request(&lookup.symbol)?;

    Ok(Json(StockResponse {
        name: Some(lookup.name),
        symbol: Some(lookup.symbol),
        open: Some(lookup.open),
        high: Some(lookup.high),
        low: Some(lookup.low),
        close: Some(lookup.close),
    }))
}

/// The caller's lookup history, newest quote date first - GET /history
async fn history(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<HistoryEntry>>> {
    let records = state.db.history_for_user(user.id)?;
    Ok(Json(records.into_iter().map(HistoryEntry::from).collect()))
}

const TOP_STOCKS_LIMIT: u32 = 5;

/// Most requested symbols, superusers only - GET /stats
async fn stats(
    State(state): State<Arc<ApiState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<StatsEntry>>> {
    if !user.is_superuser {
        return Err(AppError::Forbidden(
            "You do not have permission to perform this action.".to_string(),
        ));
    }

    let counts = state.db.top_requested(TOP_STOCKS_LIMIT)?;
    Ok(Json(counts.into_iter().map(StatsEntry::from).collect()))
}
