/// Transport layer shared by the exchange adapters
///
/// The kernel knows how to move bytes and nothing about any particular
/// exchange's endpoints:
///
/// - `RestClient` / `ReqwestRest`: HTTP requests with a per-request
///   `Security` level, credentials supplied by a pluggable `Signer`
/// - `WsSession` / `TungsteniteWs`: a WebSocket connection whose data frames
///   are decoded by a `WsCodec`
/// - `StreamSubscriber` / `Subscription`: a cancellable handle plus a lazy
///   stream of inbound messages, consumed by pulling or via a callback
///
/// # Example
/// ```rust,no_run
/// use binance_endpoint::core::kernel::*;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let rest = RestClientBuilder::new(RestClientConfig::new(
///     "https://api.binance.com".to_string(),
///     "binance".to_string(),
/// ))
/// .build()?;
///
/// let pong = rest.get("/api/v1/ping", &[], Security::None).await?;
/// println!("{pong}");
/// # Ok(())
/// # }
/// ```
pub mod codec;
pub mod rest;
pub mod signer;
pub mod subscription;
pub mod ws;

pub use codec::WsCodec;
pub use rest::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig, Security};
pub use signer::{SignatureResult, Signer};
pub use subscription::{
    CancelSignal, MessageStream, StreamSubscriber, Subscription, SubscriptionHandle,
    DEFAULT_CHANNEL_CAPACITY,
};
pub use ws::{TungsteniteWs, WsConfig, WsSession};
