use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

/// One full-document snapshot as delivered by the realtime store.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub id: String,
    pub data: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("store read failed: {0}")]
    Read(String),
    #[error("store write failed: {0}")]
    Write(String),
    #[error("snapshot decode failed: {0}")]
    Decode(String),
}

/// Live snapshot stream for a single document: a lazy, unbounded sequence of
/// full-document snapshots, one per remote mutation. Delivery stops once the
/// subscription is released; the stream cannot be restarted.
#[derive(Debug)]
pub struct Subscription {
    updates: mpsc::UnboundedReceiver<Snapshot>,
}

impl Subscription {
    pub fn new(updates: mpsc::UnboundedReceiver<Snapshot>) -> Self {
        Self { updates }
    }

    /// Wait for the next snapshot. Returns `None` once the stream closes.
    pub async fn next(&mut self) -> Option<Snapshot> {
        self.updates.recv().await
    }

    /// Take an already-delivered snapshot without waiting.
    pub fn try_next(&mut self) -> Option<Snapshot> {
        self.updates.try_recv().ok()
    }

    /// Release the stream. Dropping the subscription has the same effect;
    /// this method names the intent at teardown sites.
    pub fn unsubscribe(mut self) {
        self.updates.close();
    }
}

/// Document store delivering one-shot reads and live per-document snapshot
/// streams. Injected wherever the admin views need remote state; callers must
/// release subscriptions to stop delivery.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Single request/response read of a document; no live updates, no retry.
    async fn fetch(&self, collection: &str, id: &str) -> Result<Option<Snapshot>, SnapshotError>;

    /// Open a live snapshot stream for a document.
    fn subscribe(&self, collection: &str, id: &str) -> Subscription;

    /// Upsert a document, fanning the new snapshot out to live subscribers.
    async fn put(&self, collection: &str, id: &str, data: Value) -> Result<(), SnapshotError>;
}
