use super::Endpoint;
use crate::core::kernel::{RestClient, StreamSubscriber};
use crate::core::types::Params;
use crate::exchanges::binance::options::{AllOrdersOptions, MyTradesOptions};
use crate::exchanges::binance::rest::{ACCOUNT, ALL_ORDERS, MY_TRADES, USER_DATA_STREAM};
use serde_json::Value;
use tracing::instrument;

impl<R: RestClient, S: StreamSubscriber> Endpoint<R, S> {
    #[instrument(skip(self), fields(exchange = "binance"))]
    pub async fn all_orders(&self, symbol: &str, options: AllOrdersOptions) -> Option<Value> {
        let mut params = options.into_params();
        params.insert("symbol", symbol);

        self.rest.signed_get(ALL_ORDERS, &params).await
    }

    #[instrument(skip(self), fields(exchange = "binance"))]
    pub async fn my_account(&self) -> Option<Value> {
        self.rest.signed_get(ACCOUNT, &Params::new()).await
    }

    #[instrument(skip(self), fields(exchange = "binance"))]
    pub async fn my_trades(&self, symbol: &str, options: MyTradesOptions) -> Option<Value> {
        let mut params = options.into_params();
        params.insert("symbol", symbol);

        self.rest.signed_get(MY_TRADES, &params).await
    }

    /// Open a user-data stream; the response carries the listen key
    #[instrument(skip(self), fields(exchange = "binance"))]
    pub async fn start_user_data_stream(&self) -> Option<Value> {
        self.rest.user_post(USER_DATA_STREAM, &Params::new()).await
    }

    /// Open a user-data stream and return only its listen key
    pub async fn listen_key(&self) -> Option<String> {
        self.start_user_data_stream()
            .await
            .and_then(|value| self.decoders.decode_listen_key(&value))
    }

    #[instrument(skip(self), fields(exchange = "binance"))]
    pub async fn keepalive_user_data_stream(&self, listen_key: &str) -> Option<Value> {
        self.rest
            .user_put(USER_DATA_STREAM, &Params::from([("listenKey", listen_key)]))
            .await
    }

    #[instrument(skip(self), fields(exchange = "binance"))]
    pub async fn close_user_data_stream(&self, listen_key: &str) -> Option<Value> {
        self.rest
            .user_delete(USER_DATA_STREAM, &Params::from([("listenKey", listen_key)]))
            .await
    }
}
