//! Environment-backed configuration for both services
//!
//! Values come from the process environment (a `.env` file is loaded by the
//! binaries before this runs). Every knob has a development default so the
//! services start with no configuration at all.

use crate::error::{AppError, Result};
use std::path::PathBuf;

const DEFAULT_QUOTE_URL: &str = "https://stooq.com/q/l/";

/// Configuration for the public API service
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    /// Base URL of the internal stock service
    pub stock_service_url: String,
    pub jwt_secret: String,
    /// Site-wide pepper appended to passwords before hashing
    pub pepper: String,
    pub access_token_lifetime_secs: i64,
    pub refresh_token_lifetime_secs: i64,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(s) if !s.is_empty() => s,
            _ => {
                tracing::warn!("JWT_SECRET not set, using an insecure development secret");
                "insecure-development-secret".to_string()
            }
        };

        Ok(Self {
            host: env_or("API_HOST", "127.0.0.1"),
            port: env_parse("API_PORT", 8000)?,
            database_path: PathBuf::from(env_or("DATABASE_PATH", "api_service.db")),
            stock_service_url: env_or("STOCK_SERVICE_URL", "http://localhost:8001"),
            jwt_secret,
            pepper: env_or("PASSWORD_PEPPER", ""),
            access_token_lifetime_secs: env_parse("ACCESS_TOKEN_LIFETIME", 1800)?,
            refresh_token_lifetime_secs: env_parse("REFRESH_TOKEN_LIFETIME", 86400)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration for the internal stock service
#[derive(Debug, Clone)]
pub struct StockConfig {
    pub host: String,
    pub port: u16,
    /// Base URL of the third-party CSV quote provider
    pub quote_url: String,
}

impl StockConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env_or("STOCK_HOST", "127.0.0.1"),
            port: env_parse("STOCK_PORT", 8001)?,
            quote_url: env_or("QUOTE_URL", DEFAULT_QUOTE_URL),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::Config(format!("Invalid value for {}: {}", key, raw))),
        Err(_) => Ok(default),
    }
}
