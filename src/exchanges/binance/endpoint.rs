use crate::core::kernel::{RestClient, StreamSubscriber};
use crate::exchanges::binance::decoders::ResponseDecoders;
use crate::exchanges::binance::rest::BinanceRestClient;

pub mod account;
pub mod market_data;
pub mod streams;
pub mod trading;

/// Binance session: one method per REST endpoint or stream.
///
/// REST methods return `None` when the request fails or the response does
/// not have the expected shape; the cause has already been logged. Stream
/// methods return immediately and must be called inside a Tokio runtime.
pub struct Endpoint<R: RestClient, S: StreamSubscriber> {
    rest: BinanceRestClient<R>,
    decoders: ResponseDecoders,
    subscriber: S,
}

impl<R: RestClient, S: StreamSubscriber> Endpoint<R, S> {
    pub fn new(rest: R, subscriber: S) -> Self {
        Self::with_decoders(rest, subscriber, ResponseDecoders::default())
    }

    /// Create an endpoint reporting decode mismatches through `decoders`
    pub fn with_decoders(rest: R, subscriber: S, decoders: ResponseDecoders) -> Self {
        Self {
            rest: BinanceRestClient::new(rest),
            decoders,
            subscriber,
        }
    }

    pub fn rest(&self) -> &BinanceRestClient<R> {
        &self.rest
    }

    pub fn decoders(&self) -> &ResponseDecoders {
        &self.decoders
    }

    pub fn subscriber(&self) -> &S {
        &self.subscriber
    }
}
