use super::Endpoint;
use crate::core::kernel::{RestClient, StreamSubscriber};
use crate::core::types::Params;
use crate::exchanges::binance::options::OrderOptions;
use crate::exchanges::binance::rest::{OPEN_ORDERS, ORDER};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::instrument;

pub const BUY: &str = "BUY";
pub const SELL: &str = "SELL";
pub const LIMIT: &str = "LIMIT";
pub const MARKET: &str = "MARKET";

impl<R: RestClient, S: StreamSubscriber> Endpoint<R, S> {
    /// Place an order.
    ///
    /// `side` and `order_type` are sent verbatim. A `LIMIT` order is always
    /// sent with `timeInForce=GTC`, replacing any caller-supplied value.
    #[instrument(skip(self), fields(exchange = "binance"))]
    pub async fn order(
        &self,
        side: &str,
        order_type: &str,
        symbol: &str,
        quantity: Decimal,
        options: OrderOptions,
    ) -> Option<Value> {
        let mut params = options.into_params();
        params.insert("side", side);
        params.insert("type", order_type);
        params.insert("symbol", symbol);
        params.insert("quantity", quantity);
        if order_type == LIMIT {
            params.insert("timeInForce", "GTC");
        }

        self.rest.signed_post(ORDER, &params).await
    }

    pub async fn buy_limit(
        &self,
        symbol: &str,
        quantity: Decimal,
        price: Decimal,
        extra: Params,
    ) -> Option<Value> {
        let options = OrderOptions::default().with_extra(extra).with_price(price);
        self.order(BUY, LIMIT, symbol, quantity, options).await
    }

    pub async fn sell_limit(
        &self,
        symbol: &str,
        quantity: Decimal,
        price: Decimal,
        extra: Params,
    ) -> Option<Value> {
        let options = OrderOptions::default().with_extra(extra).with_price(price);
        self.order(SELL, LIMIT, symbol, quantity, options).await
    }

    pub async fn buy_market(
        &self,
        symbol: &str,
        quantity: Decimal,
        extra: Params,
    ) -> Option<Value> {
        let options = OrderOptions::default().with_extra(extra);
        self.order(BUY, MARKET, symbol, quantity, options).await
    }

    pub async fn sell_market(
        &self,
        symbol: &str,
        quantity: Decimal,
        extra: Params,
    ) -> Option<Value> {
        let options = OrderOptions::default().with_extra(extra);
        self.order(SELL, MARKET, symbol, quantity, options).await
    }

    #[instrument(skip(self), fields(exchange = "binance"))]
    pub async fn order_status(&self, symbol: &str, order_id: &str) -> Option<Value> {
        let params = Params::from([("symbol", symbol), ("orderId", order_id)]);
        self.rest.signed_get(ORDER, &params).await
    }

    #[instrument(skip(self), fields(exchange = "binance"))]
    pub async fn cancel_order(&self, symbol: &str, order_id: &str) -> Option<Value> {
        let params = Params::from([("symbol", symbol), ("orderId", order_id)]);
        self.rest.signed_delete(ORDER, &params).await
    }

    #[instrument(skip(self), fields(exchange = "binance"))]
    pub async fn open_orders(&self, symbol: &str) -> Option<Value> {
        self.rest
            .signed_get(OPEN_ORDERS, &Params::from([("symbol", symbol)]))
            .await
    }
}
