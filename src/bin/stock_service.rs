//! Internal stock service: scrapes the quote provider and serves JSON

use anyhow::Context;
use std::sync::Arc;
use stock_relay::config::StockConfig;
use stock_relay::stock::{router, StockState};
use stock_relay::upstream::StooqClient;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    stock_relay::init_tracing("stock_relay=debug,tower_http=info");

    let config = StockConfig::from_env()?;

    let state = Arc::new(StockState {
        source: Arc::new(StooqClient::new(&config.quote_url)),
    });

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    info!("Stock service listening on {}", addr);
    info!("Quote provider: {}", config.quote_url);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
