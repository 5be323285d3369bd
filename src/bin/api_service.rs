//! Public API service: authenticated stock lookups, history, and stats

use anyhow::Context;
use std::sync::Arc;
use stock_relay::api::client::StockServiceClient;
use stock_relay::api::router;
use stock_relay::config::ApiConfig;
use stock_relay::db::Db;
use stock_relay::security::{HashingManager, TokenManager};
use stock_relay::state::ApiState;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    stock_relay::init_tracing("stock_relay=debug,tower_http=info");

    let config = ApiConfig::from_env()?;

    let db = Arc::new(Db::new(&config.database_path).with_context(|| {
        format!("failed to open database at {}", config.database_path.display())
    })?);

    let state = Arc::new(ApiState {
        db,
        hashing: HashingManager::new(config.pepper.as_bytes()),
        tokens: TokenManager::new(
            &config.jwt_secret,
            config.access_token_lifetime_secs,
            config.refresh_token_lifetime_secs,
        ),
        fetcher: Arc::new(StockServiceClient::new(&config.stock_service_url)),
    });

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    info!("API service listening on {}", addr);
    info!("Proxying lookups to {}", config.stock_service_url);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
