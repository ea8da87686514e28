pub mod builder;
pub mod codec;
pub mod decoders;
pub mod endpoint;
pub mod options;
pub mod rest;
pub mod signer;
pub mod subscriber;
pub mod types;

// Re-export main types for easier importing
pub use builder::build_endpoint;
pub use codec::{BinanceCodec, BinanceMessage};
pub use decoders::{DecodeReporter, ResponseDecoders, TracingReporter};
pub use endpoint::trading::{BUY, LIMIT, MARKET, SELL};
pub use endpoint::Endpoint;
pub use options::{
    AggTradesOptions, AllOrdersOptions, KlineOptions, MyTradesOptions, OrderBookOptions,
    OrderOptions,
};
pub use rest::BinanceRestClient;
pub use signer::BinanceSigner;
pub use subscriber::TungsteniteSubscriber;
pub use types::{
    AggTrade, AggTradeEvent, CandleStick, DepthUpdateEvent, KlineData, KlineEvent, ListenKey,
    OrderBook, PriceLevel, RawEvent, TickerPrice,
};
