use async_trait::async_trait;
use tokio::sync::mpsc;

/// Receiver of serialized batches, usually the transport layer that performs
/// the network call.
///
/// Implementations must be `Send + Sync + 'static`; the pipeline calls
/// `on_batch` from a spawned timer task. Delivery is best-effort: the
/// pipeline neither waits for acknowledgement nor retries.
#[async_trait]
pub trait BatchSink: Send + Sync + 'static {
    /// Called once per closed window with the serialized payload.
    async fn on_batch(&self, payload: String);
}

/// Forwards every batch into a tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChannelSink { tx }, rx)
    }
}

#[async_trait]
impl BatchSink for ChannelSink {
    async fn on_batch(&self, payload: String) {
        if self.tx.send(payload).is_err() {
            tracing::debug!("batch receiver closed, dropping payload");
        }
    }
}

/// Adapts a plain closure into a sink.
pub struct FnSink<F>(pub F);

#[async_trait]
impl<F> BatchSink for FnSink<F>
where
    F: Fn(String) + Send + Sync + 'static,
{
    async fn on_batch(&self, payload: String) {
        (self.0)(payload)
    }
}
