use futures_util::Stream;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::{mpsc, watch};
use tracing::debug;

/// Buffer between a stream's producer task and its consumer
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

/// Opens streams by path and hands back their inbound messages
///
/// Implementations must return immediately; any connection work happens on
/// a background task owned by the returned subscription.
pub trait StreamSubscriber: Send + Sync {
    type Message: Send + 'static;

    fn subscribe(&self, stream_path: &str) -> Subscription<Self::Message>;
}

/// Cancellation side of a subscription. Cheap to clone.
///
/// Dropping every handle does not cancel the stream; it keeps running until
/// the consumer drops the [`MessageStream`] or the connection ends.
#[derive(Debug, Clone)]
pub struct SubscriptionHandle {
    stream_path: Arc<str>,
    cancel: Arc<watch::Sender<bool>>,
}

impl SubscriptionHandle {
    fn new(stream_path: &str) -> Self {
        let (cancel, _) = watch::channel(false);
        Self {
            stream_path: Arc::from(stream_path),
            cancel: Arc::new(cancel),
        }
    }

    pub fn stream_path(&self) -> &str {
        &self.stream_path
    }

    /// Stop the producer and any callback pump. Idempotent.
    pub fn cancel(&self) {
        if !self.cancel.send_replace(true) {
            debug!(stream = %self.stream_path, "Subscription cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancel.borrow()
    }

    /// A signal that resolves once [`Self::cancel`] has been called
    pub fn signal(&self) -> CancelSignal {
        CancelSignal {
            rx: self.cancel.subscribe(),
        }
    }
}

/// Awaitable view of a handle's cancellation state
#[derive(Debug)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    /// Resolves when the subscription is cancelled; pends forever once every
    /// handle is gone without cancelling.
    pub async fn cancelled(&mut self) {
        if self.rx.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }
}

/// Lazy, non-restartable sequence of inbound messages
#[derive(Debug)]
pub struct MessageStream<T> {
    rx: mpsc::Receiver<T>,
}

impl<T> MessageStream<T> {
    /// Wait for the next message. `None` once the producer has stopped.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }
}

impl<T> Stream for MessageStream<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.rx.poll_recv(cx)
    }
}

/// A live stream: a cancellable handle plus the messages it produces
///
/// Consume it by pulling from [`Self::into_parts`] or by pushing into a
/// callback with [`Self::for_each`].
#[derive(Debug)]
pub struct Subscription<T> {
    handle: SubscriptionHandle,
    messages: MessageStream<T>,
}

impl<T: Send + 'static> Subscription<T> {
    /// Create a subscription together with the producer's ends: the sender
    /// for inbound messages and the signal to stop on.
    pub fn channel(stream_path: &str, capacity: usize) -> (Self, mpsc::Sender<T>, CancelSignal) {
        let handle = SubscriptionHandle::new(stream_path);
        let signal = handle.signal();
        let (tx, rx) = mpsc::channel(capacity);
        let subscription = Self {
            handle,
            messages: MessageStream { rx },
        };
        (subscription, tx, signal)
    }

    pub fn handle(&self) -> &SubscriptionHandle {
        &self.handle
    }

    pub fn stream_path(&self) -> &str {
        self.handle.stream_path()
    }

    pub fn into_parts(self) -> (SubscriptionHandle, MessageStream<T>) {
        (self.handle, self.messages)
    }

    /// Deliver every message to `callback` on a spawned task and return the
    /// handle straight away. Must be called from within a Tokio runtime.
    pub fn for_each<F>(self, mut callback: F) -> SubscriptionHandle
    where
        F: FnMut(T) + Send + 'static,
    {
        let (handle, mut messages) = self.into_parts();
        let mut signal = handle.signal();
        let stream_path = handle.stream_path().to_string();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    () = signal.cancelled() => break,
                    next = messages.recv() => match next {
                        Some(message) => callback(message),
                        None => break,
                    },
                }
            }
            debug!(stream = %stream_path, "Callback pump stopped");
        });

        handle
    }
}
