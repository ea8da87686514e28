use binance_endpoint::exchanges::binance::OrderBookOptions;
use binance_endpoint::{build_endpoint, ExchangeConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Public endpoints work without credentials
    let config = load_config();
    let endpoint = build_endpoint(config)?;

    match endpoint.ping().await {
        Some(_) => info!("Ping OK"),
        None => warn!("Ping failed"),
    }

    if let Some(server_time) = endpoint.time().await {
        info!(server_time, "Server time");
    }

    let options = OrderBookOptions::default().with_limit(5);
    if let Some(book) = endpoint.order_book("BTCUSDT", options).await {
        info!(last_update_id = book.last_update_id, "BTCUSDT order book");
        for level in &book.bids {
            info!("  bid {} x {}", level.price, level.quantity);
        }
        for level in &book.asks {
            info!("  ask {} x {}", level.price, level.quantity);
        }
    }

    Ok(())
}

#[cfg(feature = "env-file")]
fn load_config() -> ExchangeConfig {
    ExchangeConfig::from_env_file("BINANCE").unwrap_or_else(|_| ExchangeConfig::read_only())
}

#[cfg(not(feature = "env-file"))]
fn load_config() -> ExchangeConfig {
    ExchangeConfig::from_env("BINANCE").unwrap_or_else(|_| ExchangeConfig::read_only())
}
