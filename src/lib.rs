pub mod core;
pub mod exchanges;

pub use core::{config::ExchangeConfig, errors::ExchangeError, types::Params};
pub use exchanges::binance::{build_endpoint, Endpoint};
