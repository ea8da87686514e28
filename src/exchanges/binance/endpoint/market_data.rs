use super::Endpoint;
use crate::core::kernel::{RestClient, StreamSubscriber};
use crate::core::types::Params;
use crate::exchanges::binance::options::{AggTradesOptions, KlineOptions, OrderBookOptions};
use crate::exchanges::binance::rest::{
    AGG_TRADES, DEPTH, KLINES, PING, TICKER_24HR, TICKER_ALL_BOOK_TICKERS, TICKER_ALL_PRICES,
    TIME,
};
use crate::exchanges::binance::types::{AggTrade, CandleStick, OrderBook, TickerPrice};
use serde_json::Value;
use tracing::instrument;

impl<R: RestClient, S: StreamSubscriber> Endpoint<R, S> {
    /// Test connectivity; the body is returned as is
    #[instrument(skip(self), fields(exchange = "binance"))]
    pub async fn ping(&self) -> Option<Value> {
        self.rest.public_get(PING, &Params::new()).await
    }

    /// Server time in milliseconds since the epoch
    #[instrument(skip(self), fields(exchange = "binance"))]
    pub async fn time(&self) -> Option<i64> {
        self.rest
            .public_get(TIME, &Params::new())
            .await
            .and_then(|value| self.decoders.decode_server_time(&value))
    }

    #[instrument(skip(self), fields(exchange = "binance"))]
    pub async fn order_book(&self, symbol: &str, options: OrderBookOptions) -> Option<OrderBook> {
        let mut params = options.into_params();
        params.insert("symbol", symbol);

        self.rest
            .public_get(DEPTH, &params)
            .await
            .and_then(|value| self.decoders.decode_order_book(&value))
    }

    #[instrument(skip(self), fields(exchange = "binance"))]
    pub async fn agg_trades(
        &self,
        symbol: &str,
        options: AggTradesOptions,
    ) -> Option<Vec<AggTrade>> {
        let mut params = options.into_params();
        params.insert("symbol", symbol);

        self.rest
            .public_get(AGG_TRADES, &params)
            .await
            .and_then(|value| self.decoders.decode_agg_trades(&value))
    }

    #[instrument(skip(self), fields(exchange = "binance"))]
    pub async fn candlestick_bars(
        &self,
        symbol: &str,
        interval: &str,
        options: KlineOptions,
    ) -> Option<Vec<CandleStick>> {
        let mut params = options.into_params();
        params.insert("symbol", symbol);
        params.insert("interval", interval);

        self.rest
            .public_get(KLINES, &params)
            .await
            .and_then(|value| self.decoders.decode_candlesticks(&value))
    }

    #[instrument(skip(self), fields(exchange = "binance"))]
    pub async fn ticker_24hr(&self, symbol: &str) -> Option<Value> {
        self.rest
            .public_get(TICKER_24HR, &Params::from([("symbol", symbol)]))
            .await
    }

    #[instrument(skip(self), fields(exchange = "binance"))]
    pub async fn ticker_all_prices(&self) -> Option<Value> {
        self.rest.public_get(TICKER_ALL_PRICES, &Params::new()).await
    }

    /// Latest price of every symbol
    #[instrument(skip(self), fields(exchange = "binance"))]
    pub async fn all_prices(&self) -> Option<Vec<TickerPrice>> {
        self.ticker_all_prices()
            .await
            .and_then(|value| self.decoders.decode_ticker_prices(&value))
    }

    /// Best bid and ask of every symbol
    #[instrument(skip(self), fields(exchange = "binance"))]
    pub async fn ticker_all_book_tickers(&self) -> Option<Value> {
        self.rest
            .public_get(TICKER_ALL_BOOK_TICKERS, &Params::new())
            .await
    }
}
