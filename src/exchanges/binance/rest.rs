use crate::core::kernel::{RestClient, Security};
use crate::core::types::Params;
use reqwest::Method;
use serde_json::Value;
use tracing::warn;

pub const PING: &str = "/api/v1/ping";
pub const TIME: &str = "/api/v1/time";
pub const DEPTH: &str = "/api/v1/depth";
pub const AGG_TRADES: &str = "/api/v1/aggTrades";
pub const KLINES: &str = "/api/v1/klines";
pub const TICKER_24HR: &str = "/api/v1/ticker/24hr";
pub const TICKER_ALL_PRICES: &str = "/api/v1/ticker/allPrices";
pub const TICKER_ALL_BOOK_TICKERS: &str = "/api/v1/ticker/allBookTickers";
pub const ORDER: &str = "/api/v3/order";
pub const OPEN_ORDERS: &str = "/api/v3/openOrders";
pub const ALL_ORDERS: &str = "/api/v3/allOrders";
pub const ACCOUNT: &str = "/api/v3/account";
pub const MY_TRADES: &str = "/api/v3/myTrades";
pub const USER_DATA_STREAM: &str = "/api/v1/userDataStream";

/// Thin wrapper around `RestClient` exposing the three request families
/// Binance distinguishes: public, signed and user-key.
///
/// Every primitive yields `None` on any failure; the cause is logged here.
pub struct BinanceRestClient<R: RestClient> {
    client: R,
}

impl<R: RestClient> BinanceRestClient<R> {
    pub fn new(client: R) -> Self {
        Self { client }
    }

    pub fn inner(&self) -> &R {
        &self.client
    }

    pub async fn public_get(&self, path: &str, params: &Params) -> Option<Value> {
        self.send(Method::GET, path, params, Security::None).await
    }

    pub async fn signed_get(&self, path: &str, params: &Params) -> Option<Value> {
        self.send(Method::GET, path, params, Security::Signed).await
    }

    pub async fn signed_post(&self, path: &str, params: &Params) -> Option<Value> {
        self.send(Method::POST, path, params, Security::Signed)
            .await
    }

    pub async fn signed_delete(&self, path: &str, params: &Params) -> Option<Value> {
        self.send(Method::DELETE, path, params, Security::Signed)
            .await
    }

    pub async fn user_post(&self, path: &str, params: &Params) -> Option<Value> {
        self.send(Method::POST, path, params, Security::ApiKey)
            .await
    }

    pub async fn user_put(&self, path: &str, params: &Params) -> Option<Value> {
        self.send(Method::PUT, path, params, Security::ApiKey).await
    }

    pub async fn user_delete(&self, path: &str, params: &Params) -> Option<Value> {
        self.send(Method::DELETE, path, params, Security::ApiKey)
            .await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        params: &Params,
        security: Security,
    ) -> Option<Value> {
        let pairs = params.as_pairs();
        let result = self
            .client
            .request(method.clone(), path, &pairs, security)
            .await;

        match result {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(
                    exchange = "binance",
                    %method,
                    path,
                    %security,
                    error = %e,
                    "Request failed"
                );
                None
            }
        }
    }
}
