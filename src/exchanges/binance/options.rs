//! Optional request parameters per endpoint.
//!
//! `Default` means "no options". Typed fields overlay `extra`, and the
//! endpoint's required arguments overlay both.

use crate::core::types::Params;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBookOptions {
    pub limit: Option<u32>,
    pub extra: Params,
}

impl OrderBookOptions {
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn into_params(self) -> Params {
        let mut params = self.extra;
        params.insert_opt("limit", self.limit);
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggTradesOptions {
    pub from_id: Option<u64>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub limit: Option<u32>,
    pub extra: Params,
}

impl AggTradesOptions {
    pub fn with_from_id(mut self, from_id: u64) -> Self {
        self.from_id = Some(from_id);
        self
    }

    pub fn with_time_range(mut self, start_time: i64, end_time: i64) -> Self {
        self.start_time = Some(start_time);
        self.end_time = Some(end_time);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn into_params(self) -> Params {
        let mut params = self.extra;
        params.insert_opt("fromId", self.from_id);
        params.insert_opt("startTime", self.start_time);
        params.insert_opt("endTime", self.end_time);
        params.insert_opt("limit", self.limit);
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KlineOptions {
    pub limit: Option<u32>,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub extra: Params,
}

impl KlineOptions {
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_time_range(mut self, start_time: i64, end_time: i64) -> Self {
        self.start_time = Some(start_time);
        self.end_time = Some(end_time);
        self
    }

    pub fn into_params(self) -> Params {
        let mut params = self.extra;
        params.insert_opt("limit", self.limit);
        params.insert_opt("startTime", self.start_time);
        params.insert_opt("endTime", self.end_time);
        params
    }
}

/// Options for `Endpoint::order`. `price` is not required by the order
/// call itself; the exchange rejects a LIMIT order without one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderOptions {
    pub price: Option<Decimal>,
    pub extra: Params,
}

impl OrderOptions {
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_extra(mut self, extra: Params) -> Self {
        self.extra = extra;
        self
    }

    pub fn into_params(self) -> Params {
        let mut params = self.extra;
        params.insert_opt("price", self.price);
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllOrdersOptions {
    pub order_id: Option<String>,
    pub limit: Option<u32>,
    pub extra: Params,
}

impl AllOrdersOptions {
    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn into_params(self) -> Params {
        let mut params = self.extra;
        params.insert_opt("orderId", self.order_id);
        params.insert_opt("limit", self.limit);
        params
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MyTradesOptions {
    pub from_id: Option<u64>,
    pub limit: Option<u32>,
    pub extra: Params,
}

impl MyTradesOptions {
    pub fn with_from_id(mut self, from_id: u64) -> Self {
        self.from_id = Some(from_id);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn into_params(self) -> Params {
        let mut params = self.extra;
        params.insert_opt("fromId", self.from_id);
        params.insert_opt("limit", self.limit);
        params
    }
}
