//! Bearer-token authentication for API handlers

use crate::db::models::User;
use crate::error::AppError;
use crate::state::ApiState;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use std::sync::Arc;

const MISSING_CREDENTIALS: &str = "Authentication credentials were not provided.";

/// The authenticated caller, resolved from the `Authorization: Bearer`
/// header before the handler body runs
pub struct CurrentUser(pub User);

#[axum::async_trait]
impl FromRequestParts<Arc<ApiState>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<ApiState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Auth(MISSING_CREDENTIALS.to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Auth(MISSING_CREDENTIALS.to_string()))?;

        let user_id = state.tokens.verify_access(token)?;

        let user = state
            .db
            .get_user(user_id)?
            .ok_or_else(|| AppError::Auth("User not found.".to_string()))?;

        Ok(CurrentUser(user))
    }
}
