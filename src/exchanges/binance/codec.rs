use crate::core::errors::ExchangeError;
use crate::core::kernel::WsCodec;
use crate::exchanges::binance::types::{AggTradeEvent, DepthUpdateEvent, KlineEvent, RawEvent};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tokio_tungstenite::tungstenite::Message;

/// A decoded inbound stream frame
#[derive(Debug, Clone, PartialEq)]
pub enum BinanceMessage {
    DepthUpdate(DepthUpdateEvent),
    Kline(KlineEvent),
    AggTrade(AggTradeEvent),
    /// User-data events and anything else without a dedicated type
    Raw(RawEvent),
}

impl BinanceMessage {
    /// The `e` field of the frame, when it carries one
    pub fn event_type(&self) -> Option<&str> {
        match self {
            Self::DepthUpdate(_) => Some("depthUpdate"),
            Self::Kline(_) => Some("kline"),
            Self::AggTrade(_) => Some("aggTrade"),
            Self::Raw(value) => value.get("e").and_then(Value::as_str),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BinanceCodec;

impl WsCodec for BinanceCodec {
    type Message = BinanceMessage;

    fn decode_message(&self, message: Message) -> Result<Option<Self::Message>, ExchangeError> {
        let text = match message {
            Message::Text(text) => text,
            Message::Binary(data) => String::from_utf8(data).map_err(|e| {
                ExchangeError::DeserializationError(format!(
                    "Invalid UTF-8 in binary message: {}",
                    e
                ))
            })?,
            _ => return Ok(None),
        };

        let value: Value = serde_json::from_str(&text).map_err(|e| {
            ExchangeError::DeserializationError(format!("Failed to parse JSON: {}", e))
        })?;

        let event_type = value.get("e").and_then(Value::as_str).unwrap_or_default();
        let message = match event_type {
            "depthUpdate" => BinanceMessage::DepthUpdate(parse(&value, "depth update")?),
            "kline" => BinanceMessage::Kline(parse(&value, "kline")?),
            "aggTrade" => BinanceMessage::AggTrade(parse(&value, "aggregate trade")?),
            _ => BinanceMessage::Raw(value),
        };

        Ok(Some(message))
    }
}

fn parse<T: DeserializeOwned>(value: &Value, what: &str) -> Result<T, ExchangeError> {
    T::deserialize(value).map_err(|e| {
        ExchangeError::DeserializationError(format!("Failed to parse {}: {}", what, e))
    })
}

/// `<symbol>@depth`
pub fn depth_stream(symbol: &str) -> String {
    format!("{}@depth", symbol)
}

/// `<symbol>@kline_<interval>`
pub fn kline_stream(symbol: &str, interval: &str) -> String {
    format!("{}@kline_{}", symbol, interval)
}

/// `<symbol>@aggTrade`
pub fn agg_trade_stream(symbol: &str) -> String {
    format!("{}@aggTrade", symbol)
}

/// A user-data stream is addressed by its listen key alone
pub fn user_data_stream(listen_key: &str) -> String {
    listen_key.to_string()
}
