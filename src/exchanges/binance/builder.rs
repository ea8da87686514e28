use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{ReqwestRest, RestClientBuilder, RestClientConfig};
use crate::exchanges::binance::{
    endpoint::Endpoint, signer::BinanceSigner, subscriber::TungsteniteSubscriber,
};
use std::sync::Arc;
use tracing::debug;

/// Create a Binance endpoint over `reqwest` and `tokio-tungstenite`
///
/// Without an API key only public endpoints and market streams succeed.
/// With a key but no secret, user-key calls work and signed calls return
/// `None`.
pub fn build_endpoint(
    config: ExchangeConfig,
) -> Result<Endpoint<ReqwestRest, TungsteniteSubscriber>, ExchangeError> {
    let rest_config = RestClientConfig::new(config.rest_url(), "binance".to_string());

    let mut rest_builder = RestClientBuilder::new(rest_config);

    // a key alone is enough for the user-data-stream calls
    if !config.api_key().is_empty() {
        let signer = Arc::new(BinanceSigner::new(
            config.api_key().to_string(),
            config.secret_key().to_string(),
        ));
        rest_builder = rest_builder.with_signer(signer);
    }

    let rest = rest_builder.build()?;
    let subscriber = TungsteniteSubscriber::new(config.ws_url());

    debug!(
        exchange = "binance",
        rest_url = %config.rest_url(),
        ws_url = %config.ws_url(),
        authenticated = config.has_credentials(),
        "Endpoint built"
    );

    Ok(Endpoint::new(rest, subscriber))
}
