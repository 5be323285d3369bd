//! Stock quote relay
//!
//! Two services built from one library:
//! - the stock service scrapes a third-party CSV quote endpoint and
//!   normalizes it to JSON (internal, unauthenticated);
//! - the API service authenticates users, proxies lookups to the stock
//!   service, records every lookup, and reports aggregate usage.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod security;
pub mod state;
pub mod stock;
pub mod upstream;

/// Initialize tracing/logging for a service binary
pub fn init_tracing(default_filter: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
