use super::Endpoint;
use crate::core::kernel::{RestClient, StreamSubscriber, Subscription, SubscriptionHandle};
use crate::exchanges::binance::codec::{
    agg_trade_stream, depth_stream, kline_stream, user_data_stream,
};
use tracing::debug;

impl<R: RestClient, S: StreamSubscriber> Endpoint<R, S> {
    /// Open a stream by its raw path
    pub fn subscribe(&self, stream_path: &str) -> Subscription<S::Message> {
        debug!(exchange = "binance", stream = stream_path, "Subscribing");
        self.subscriber.subscribe(stream_path)
    }

    pub fn subscribe_depth(&self, symbol: &str) -> Subscription<S::Message> {
        self.subscribe(&depth_stream(symbol))
    }

    pub fn subscribe_klines(&self, symbol: &str, interval: &str) -> Subscription<S::Message> {
        self.subscribe(&kline_stream(symbol, interval))
    }

    pub fn subscribe_trades(&self, symbol: &str) -> Subscription<S::Message> {
        self.subscribe(&agg_trade_stream(symbol))
    }

    pub fn subscribe_user_data(&self, listen_key: &str) -> Subscription<S::Message> {
        self.subscribe(&user_data_stream(listen_key))
    }

    /// Push every depth update for `symbol` into `callback`
    pub fn depth_websocket<F>(&self, symbol: &str, callback: F) -> SubscriptionHandle
    where
        F: FnMut(S::Message) + Send + 'static,
    {
        self.subscribe_depth(symbol).for_each(callback)
    }

    pub fn kline_websocket<F>(
        &self,
        symbol: &str,
        interval: &str,
        callback: F,
    ) -> SubscriptionHandle
    where
        F: FnMut(S::Message) + Send + 'static,
    {
        self.subscribe_klines(symbol, interval).for_each(callback)
    }

    pub fn trades_websocket<F>(&self, symbol: &str, callback: F) -> SubscriptionHandle
    where
        F: FnMut(S::Message) + Send + 'static,
    {
        self.subscribe_trades(symbol).for_each(callback)
    }

    pub fn user_data_websocket<F>(&self, listen_key: &str, callback: F) -> SubscriptionHandle
    where
        F: FnMut(S::Message) + Send + 'static,
    {
        self.subscribe_user_data(listen_key).for_each(callback)
    }
}
