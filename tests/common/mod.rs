#![allow(dead_code)]

use async_trait::async_trait;
use binance_endpoint::core::errors::ExchangeError;
use binance_endpoint::core::kernel::{RestClient, Security, StreamSubscriber, Subscription};
use binance_endpoint::exchanges::binance::{DecodeReporter, Endpoint, ResponseDecoders};
use reqwest::Method;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// One request as seen by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub params: BTreeMap<String, String>,
    pub security: Security,
}

/// `RestClient` double: records every request and answers from a table of
/// canned bodies keyed by `(method, path)`. Unknown routes fail.
#[derive(Clone, Default)]
pub struct RecordingRest {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responses: Arc<Mutex<HashMap<(Method, String), Value>>>,
}

impl RecordingRest {
    pub fn respond(&self, method: Method, path: &str, body: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert((method, path.to_string()), body);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> RecordedRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request recorded")
    }
}

#[async_trait]
impl RestClient for RecordingRest {
    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        query_params: &[(&str, &str)],
        security: Security,
    ) -> Result<Value, ExchangeError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.clone(),
            path: endpoint.to_string(),
            params: query_params
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            security,
        });

        self.responses
            .lock()
            .unwrap()
            .get(&(method, endpoint.to_string()))
            .cloned()
            .ok_or_else(|| ExchangeError::NetworkError("no canned response".to_string()))
    }
}

/// `StreamSubscriber` double: records stream paths and keeps each
/// subscription's sender so tests can push frames into it.
#[derive(Clone, Default)]
pub struct RecordingSubscriber {
    subscriptions: Arc<Mutex<Vec<(String, mpsc::Sender<Value>)>>>,
}

impl RecordingSubscriber {
    pub fn paths(&self) -> Vec<String> {
        self.subscriptions
            .lock()
            .unwrap()
            .iter()
            .map(|(path, _)| path.clone())
            .collect()
    }

    pub fn sender(&self, index: usize) -> mpsc::Sender<Value> {
        self.subscriptions.lock().unwrap()[index].1.clone()
    }
}

impl StreamSubscriber for RecordingSubscriber {
    type Message = Value;

    fn subscribe(&self, stream_path: &str) -> Subscription<Value> {
        let (subscription, tx, _signal) = Subscription::channel(stream_path, 16);
        self.subscriptions
            .lock()
            .unwrap()
            .push((stream_path.to_string(), tx));
        subscription
    }
}

/// Counts decode-mismatch diagnostics
#[derive(Default)]
pub struct CountingReporter {
    count: Mutex<usize>,
}

impl CountingReporter {
    pub fn count(&self) -> usize {
        *self.count.lock().unwrap()
    }
}

impl DecodeReporter for CountingReporter {
    fn report(&self, _decoder: &'static str, _raw: &Value, _reason: &str) {
        *self.count.lock().unwrap() += 1;
    }
}

pub struct Harness {
    pub endpoint: Endpoint<RecordingRest, RecordingSubscriber>,
    pub rest: RecordingRest,
    pub subscriber: RecordingSubscriber,
    pub reporter: Arc<CountingReporter>,
}

pub fn harness() -> Harness {
    let rest = RecordingRest::default();
    let subscriber = RecordingSubscriber::default();
    let reporter = Arc::new(CountingReporter::default());
    let endpoint = Endpoint::with_decoders(
        rest.clone(),
        subscriber.clone(),
        ResponseDecoders::new(reporter.clone()),
    );

    Harness {
        endpoint,
        rest,
        subscriber,
        reporter,
    }
}

pub fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}
