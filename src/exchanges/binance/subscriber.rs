use crate::core::kernel::{
    CancelSignal, StreamSubscriber, Subscription, TungsteniteWs, WsConfig, WsSession,
    DEFAULT_CHANNEL_CAPACITY,
};
use crate::exchanges::binance::codec::{BinanceCodec, BinanceMessage};
use tokio::sync::mpsc;
use tracing::{debug, error, instrument, warn};

/// Opens raw streams at `{ws_url}/ws/{stream_path}`, one connection per
/// subscription, each driven by its own task.
#[derive(Debug, Clone)]
pub struct TungsteniteSubscriber {
    ws_url: String,
    config: WsConfig,
    capacity: usize,
}

impl TungsteniteSubscriber {
    pub fn new(ws_url: impl Into<String>) -> Self {
        Self {
            ws_url: ws_url.into().trim_end_matches('/').to_string(),
            config: WsConfig::default(),
            capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    pub fn with_config(mut self, config: WsConfig) -> Self {
        self.config = config;
        self
    }

    /// Messages buffered per subscription before the connection task waits
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    pub fn stream_url(&self, stream_path: &str) -> String {
        format!("{}/ws/{}", self.ws_url, stream_path)
    }
}

impl StreamSubscriber for TungsteniteSubscriber {
    type Message = BinanceMessage;

    fn subscribe(&self, stream_path: &str) -> Subscription<BinanceMessage> {
        let (subscription, tx, signal) = Subscription::channel(stream_path, self.capacity);
        let ws = TungsteniteWs::new(
            self.stream_url(stream_path),
            "binance".to_string(),
            BinanceCodec,
        )
        .with_config(self.config.clone());

        tokio::spawn(run_stream(ws, tx, signal));

        subscription
    }
}

#[instrument(skip_all, fields(exchange = "binance", url = %ws.url()))]
async fn run_stream(
    mut ws: TungsteniteWs<BinanceCodec>,
    tx: mpsc::Sender<BinanceMessage>,
    mut signal: CancelSignal,
) {
    let connected = tokio::select! {
        () = signal.cancelled() => return,
        result = ws.connect() => result,
    };
    if let Err(e) = connected {
        error!("Failed to open stream: {}", e);
        return;
    }

    loop {
        tokio::select! {
            () = signal.cancelled() => break,
            () = tx.closed() => break,
            next = ws.next_message() => match next {
                // a full buffer must not hold off cancellation
                Some(Ok(message)) => tokio::select! {
                    () = signal.cancelled() => break,
                    sent = tx.send(message) => {
                        if sent.is_err() {
                            break;
                        }
                    }
                },
                Some(Err(e)) => {
                    if !ws.is_connected() {
                        warn!("Stream failed: {}", e);
                        break;
                    }
                    warn!("Dropping undecodable frame: {}", e);
                }
                None => break,
            },
        }
    }

    if let Err(e) = ws.close().await {
        debug!("Error closing stream: {}", e);
    }
    debug!("Stream task finished");
}
