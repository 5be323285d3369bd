//! JWT access/refresh token pairs (HS256)
//!
//! Tokens carry the user id in `sub`, an expiry, and a `token_type`
//! discriminator so an access token can never be replayed as a refresh
//! token or vice versa.

use crate::error::{AppError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const TOKEN_TYPE_REFRESH: &str = "refresh";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub exp: i64,
    pub token_type: String,
}

/// Access + refresh tokens issued together at login
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Token issuance and verification
pub struct TokenManager {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
}

impl TokenManager {
    pub fn new(secret: &str, access_lifetime_secs: i64, refresh_lifetime_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            access_lifetime: Duration::seconds(access_lifetime_secs),
            refresh_lifetime: Duration::seconds(refresh_lifetime_secs),
        }
    }

    /// Issue an access/refresh pair for a user
    pub fn issue_pair(&self, user_id: i64) -> Result<TokenPair> {
        Ok(TokenPair {
            access: self.issue(user_id, TOKEN_TYPE_ACCESS, self.access_lifetime)?,
            refresh: self.issue(user_id, TOKEN_TYPE_REFRESH, self.refresh_lifetime)?,
        })
    }

    /// Exchange a valid refresh token for a new access token
    pub fn refresh_access(&self, refresh_token: &str) -> Result<String> {
        let user_id = self.verify_refresh(refresh_token)?;
        self.issue(user_id, TOKEN_TYPE_ACCESS, self.access_lifetime)
    }

    /// Verify an access token and return the user id it names
    pub fn verify_access(&self, token: &str) -> Result<i64> {
        self.verify(token, TOKEN_TYPE_ACCESS)
    }

    /// Verify a refresh token and return the user id it names
    pub fn verify_refresh(&self, token: &str) -> Result<i64> {
        self.verify(token, TOKEN_TYPE_REFRESH)
    }

    fn issue(&self, user_id: i64, token_type: &str, lifetime: Duration) -> Result<String> {
        let claims = Claims {
            sub: user_id,
            exp: (Utc::now() + lifetime).timestamp(),
            token_type: token_type.to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Token encoding failed: {}", e)))
    }

    fn verify(&self, token: &str, expected_type: &str) -> Result<i64> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| AppError::Auth("Token is invalid or expired.".to_string()))?;

        if data.claims.token_type != expected_type {
            return Err(AppError::Auth(format!(
                "Token has wrong type, expected '{}'.",
                expected_type
            )));
        }

        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> TokenManager {
        TokenManager::new("unit-test-secret", 300, 3600)
    }

    #[test]
    fn test_issue_and_verify_pair() {
        let tokens = manager();
        let pair = tokens.issue_pair(42).unwrap();

        assert_eq!(tokens.verify_access(&pair.access).unwrap(), 42);
        assert_eq!(tokens.verify_refresh(&pair.refresh).unwrap(), 42);
    }

    #[test]
    fn test_token_types_are_not_interchangeable() {
        let tokens = manager();
        let pair = tokens.issue_pair(7).unwrap();

        assert!(tokens.verify_access(&pair.refresh).is_err());
        assert!(tokens.verify_refresh(&pair.access).is_err());
    }

    #[test]
    fn test_refresh_yields_usable_access_token() {
        let tokens = manager();
        let pair = tokens.issue_pair(9).unwrap();

        let access = tokens.refresh_access(&pair.refresh).unwrap();
        assert_eq!(tokens.verify_access(&access).unwrap(), 9);
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = TokenManager::new("unit-test-secret", -60, -60);
        let pair = tokens.issue_pair(1).unwrap();

        assert!(tokens.verify_access(&pair.access).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let pair = manager().issue_pair(1).unwrap();
        let other = TokenManager::new("a-different-secret", 300, 3600);

        assert!(other.verify_access(&pair.access).is_err());
    }
}
