use crate::exchanges::binance::types::{AggTrade, CandleStick, ListenKey, OrderBook, TickerPrice};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::error;

/// Sink for decode-mismatch diagnostics
pub trait DecodeReporter: Send + Sync {
    /// Called exactly once per rejected payload
    fn report(&self, decoder: &'static str, raw: &Value, reason: &str);
}

/// Reports mismatches as `tracing` errors carrying the raw payload
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl DecodeReporter for TracingReporter {
    fn report(&self, decoder: &'static str, raw: &Value, reason: &str) {
        error!(exchange = "binance", decoder, raw = %raw, reason, "Unexpected response shape");
    }
}

/// Maps raw JSON responses onto typed results.
///
/// Each decoder is pure given its input: it returns `Some` when the payload
/// has the expected shape and `None` otherwise, after reporting the payload
/// and the reason once.
#[derive(Clone)]
pub struct ResponseDecoders {
    reporter: Arc<dyn DecodeReporter>,
}

impl Default for ResponseDecoders {
    fn default() -> Self {
        Self::new(Arc::new(TracingReporter))
    }
}

impl std::fmt::Debug for ResponseDecoders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseDecoders").finish_non_exhaustive()
    }
}

impl ResponseDecoders {
    pub fn new(reporter: Arc<dyn DecodeReporter>) -> Self {
        Self { reporter }
    }

    pub fn decode_server_time(&self, value: &Value) -> Option<i64> {
        let server_time = value.get("serverTime").and_then(as_whole_i64);
        if server_time.is_none() {
            self.reporter.report(
                "server_time",
                value,
                "missing or non-integral field `serverTime`",
            );
        }
        server_time
    }

    pub fn decode_order_book(&self, value: &Value) -> Option<OrderBook> {
        if let Some(field) = ["lastUpdateId", "bids", "asks"]
            .into_iter()
            .find(|field| value.get(field).is_none())
        {
            self.reporter
                .report("order_book", value, &format!("missing field `{}`", field));
            return None;
        }
        self.structural("order_book", value)
    }

    pub fn decode_agg_trades(&self, value: &Value) -> Option<Vec<AggTrade>> {
        self.array("agg_trades", value)
    }

    pub fn decode_candlesticks(&self, value: &Value) -> Option<Vec<CandleStick>> {
        self.array("candlesticks", value)
    }

    pub fn decode_ticker_prices(&self, value: &Value) -> Option<Vec<TickerPrice>> {
        self.array("ticker_prices", value)
    }

    pub fn decode_listen_key(&self, value: &Value) -> Option<String> {
        if !value.get("listenKey").is_some_and(Value::is_string) {
            self.reporter
                .report("listen_key", value, "missing string field `listenKey`");
            return None;
        }
        self.structural::<ListenKey>("listen_key", value)
            .map(|key| key.listen_key)
    }

    /// Whole-array decode; one bad element rejects the call
    fn array<T: DeserializeOwned>(&self, decoder: &'static str, value: &Value) -> Option<Vec<T>> {
        if !value.is_array() {
            self.reporter.report(decoder, value, "not an array");
            return None;
        }
        self.structural(decoder, value)
    }

    fn structural<T: DeserializeOwned>(&self, decoder: &'static str, value: &Value) -> Option<T> {
        match T::deserialize(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                self.reporter.report(decoder, value, &e.to_string());
                None
            }
        }
    }
}

/// Integers as is; floats only when whole and within `i64` range
#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
fn as_whole_i64(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingReporter {
        reports: Mutex<Vec<(&'static str, String)>>,
    }

    impl RecordingReporter {
        fn count(&self) -> usize {
            self.reports.lock().unwrap().len()
        }

        fn last(&self) -> Option<(&'static str, String)> {
            self.reports.lock().unwrap().last().cloned()
        }
    }

    impl DecodeReporter for RecordingReporter {
        fn report(&self, decoder: &'static str, _raw: &Value, reason: &str) {
            self.reports
                .lock()
                .unwrap()
                .push((decoder, reason.to_string()));
        }
    }

    fn decoders() -> (ResponseDecoders, Arc<RecordingReporter>) {
        let reporter = Arc::new(RecordingReporter::default());
        (ResponseDecoders::new(reporter.clone()), reporter)
    }

    #[test]
    fn test_server_time() {
        let (decoders, reporter) = decoders();

        assert_eq!(
            decoders.decode_server_time(&json!({"serverTime": 1_499_827_319_559_i64})),
            Some(1_499_827_319_559)
        );
        assert_eq!(reporter.count(), 0);

        assert_eq!(decoders.decode_server_time(&json!({"time": 1})), None);
        assert_eq!(reporter.count(), 1);

        assert_eq!(decoders.decode_server_time(&json!({"serverTime": "1"})), None);
        assert_eq!(reporter.count(), 2);
    }

    #[test]
    fn test_server_time_accepts_whole_float() {
        let (decoders, reporter) = decoders();

        assert_eq!(
            decoders.decode_server_time(&json!({"serverTime": 1_499_827_319_559.0_f64})),
            Some(1_499_827_319_559)
        );
        assert_eq!(reporter.count(), 0);

        assert_eq!(decoders.decode_server_time(&json!({"serverTime": 1.5})), None);
        assert_eq!(decoders.decode_server_time(&json!({"serverTime": 1e19})), None);
        assert_eq!(reporter.count(), 2);
    }

    #[test]
    fn test_order_book_preserves_levels() {
        let (decoders, reporter) = decoders();
        let raw = json!({
            "lastUpdateId": 1027024,
            "bids": [["4.00000000", "431.00000000", []], ["3.90000000", "1.00000000", []]],
            "asks": [["4.00000200", "12.00000000", []]]
        });

        let book = decoders.decode_order_book(&raw).unwrap();
        assert_eq!(book.last_update_id, 1027024);
        assert_eq!(book.bids.len(), 2);
        assert_eq!(book.asks.len(), 1);
        assert_eq!(book.bids[0].price, Decimal::new(4, 0));
        assert_eq!(book.bids[1].price, Decimal::new(39, 1));
        assert_eq!(reporter.count(), 0);
    }

    #[test]
    fn test_order_book_missing_field() {
        let (decoders, reporter) = decoders();

        for missing in ["lastUpdateId", "bids", "asks"] {
            let mut raw = json!({"lastUpdateId": 1, "bids": [], "asks": []});
            raw.as_object_mut().unwrap().remove(missing);
            assert!(decoders.decode_order_book(&raw).is_none());
        }
        assert_eq!(reporter.count(), 3);
        let (decoder, reason) = reporter.last().unwrap();
        assert_eq!(decoder, "order_book");
        assert!(reason.contains("asks"));
    }

    #[test]
    fn test_agg_trades_length_matches_input() {
        let (decoders, reporter) = decoders();
        let trade = json!({
            "a": 26129, "p": "0.01633102", "q": "4.70443515",
            "f": 27781, "l": 27781, "T": 1_498_793_709_153_i64, "m": true, "M": true
        });

        let trades = decoders
            .decode_agg_trades(&json!([trade.clone(), trade.clone(), trade]))
            .unwrap();
        assert_eq!(trades.len(), 3);

        assert_eq!(decoders.decode_agg_trades(&json!([])), Some(vec![]));
        assert_eq!(reporter.count(), 0);
    }

    #[test]
    fn test_non_array_rejected_once() {
        let (decoders, reporter) = decoders();

        assert!(decoders.decode_agg_trades(&json!({"code": -1121})).is_none());
        assert_eq!(reporter.count(), 1);
        assert_eq!(reporter.last().unwrap().1, "not an array");

        assert!(decoders.decode_candlesticks(&json!("nope")).is_none());
        assert_eq!(reporter.count(), 2);
    }

    #[test]
    fn test_malformed_element_rejects_whole_array() {
        let (decoders, reporter) = decoders();

        let result = decoders.decode_candlesticks(&json!([[1, "2"]]));
        assert!(result.is_none());
        assert_eq!(reporter.count(), 1);
    }

    #[test]
    fn test_candlesticks() {
        let (decoders, _) = decoders();
        let row = json!([
            1_499_040_000_000_i64, "0.01634790", "0.80000000", "0.01575800", "0.01577100",
            "148976.11427815", 1_499_644_799_999_i64, "2434.19055334", 308,
            "1756.87402397", "28.46694368", "0"
        ]);

        let candles = decoders.decode_candlesticks(&json!([row.clone(), row])).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].number_of_trades, 308);
    }

    #[test]
    fn test_ticker_prices_and_listen_key() {
        let (decoders, reporter) = decoders();

        let prices = decoders
            .decode_ticker_prices(&json!([{"symbol": "LTCBTC", "price": "4.00000200"}]))
            .unwrap();
        assert_eq!(prices[0].symbol, "LTCBTC");

        assert_eq!(
            decoders.decode_listen_key(&json!({"listenKey": "pqia91ma19a5s61cv6a81va65sdf19v8a65a1a5s61cv6a81va65sdf19v8a65a1"})),
            Some("pqia91ma19a5s61cv6a81va65sdf19v8a65a1a5s61cv6a81va65sdf19v8a65a1".to_string())
        );
        assert!(decoders.decode_listen_key(&json!({})).is_none());
        assert_eq!(reporter.count(), 1);
    }
}
