use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::mpsc;

use crate::workflows::prerequisites::store::{
    Snapshot, SnapshotError, SnapshotStore, Subscription,
};

type Key = (String, String);

fn key(collection: &str, id: &str) -> Key {
    (collection.to_string(), id.to_string())
}

/// Realtime-store fake: documents in a map, one snapshot fan-out per write.
#[derive(Default)]
pub(super) struct MemoryRealtimeStore {
    docs: Mutex<HashMap<Key, Value>>,
    subscribers: Mutex<HashMap<Key, Vec<mpsc::UnboundedSender<Snapshot>>>>,
    fetches: AtomicUsize,
}

impl MemoryRealtimeStore {
    pub(super) fn seed(&self, collection: &str, id: &str, data: Value) {
        self.docs
            .lock()
            .expect("docs mutex poisoned")
            .insert(key(collection, id), data);
    }

    pub(super) fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }

    pub(super) fn live_subscribers(&self, collection: &str, id: &str) -> usize {
        self.subscribers
            .lock()
            .expect("subscriber mutex poisoned")
            .get(&key(collection, id))
            .map(|senders| senders.iter().filter(|sender| !sender.is_closed()).count())
            .unwrap_or(0)
    }

    fn fan_out(&self, key: &Key, snapshot: Snapshot) {
        let mut subscribers = self.subscribers.lock().expect("subscriber mutex poisoned");
        if let Some(senders) = subscribers.get_mut(key) {
            senders.retain(|sender| sender.send(snapshot.clone()).is_ok());
        }
    }
}

#[async_trait]
impl SnapshotStore for MemoryRealtimeStore {
    async fn fetch(&self, collection: &str, id: &str) -> Result<Option<Snapshot>, SnapshotError> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        let docs = self.docs.lock().expect("docs mutex poisoned");
        Ok(docs.get(&key(collection, id)).cloned().map(|data| Snapshot {
            id: id.to_string(),
            data,
        }))
    }

    fn subscribe(&self, collection: &str, id: &str) -> Subscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .expect("subscriber mutex poisoned")
            .entry(key(collection, id))
            .or_default()
            .push(sender);
        Subscription::new(receiver)
    }

    async fn put(&self, collection: &str, id: &str, data: Value) -> Result<(), SnapshotError> {
        let key = key(collection, id);
        self.docs
            .lock()
            .expect("docs mutex poisoned")
            .insert(key.clone(), data.clone());
        self.fan_out(
            &key,
            Snapshot {
                id: id.to_string(),
                data,
            },
        );
        Ok(())
    }
}

/// Store whose every operation fails, for exercising the failure read path.
pub(super) struct UnavailableStore;

#[async_trait]
impl SnapshotStore for UnavailableStore {
    async fn fetch(&self, _: &str, _: &str) -> Result<Option<Snapshot>, SnapshotError> {
        Err(SnapshotError::Read("store unavailable".to_string()))
    }

    fn subscribe(&self, _: &str, _: &str) -> Subscription {
        let (_, receiver) = mpsc::unbounded_channel();
        Subscription::new(receiver)
    }

    async fn put(&self, _: &str, _: &str, _: Value) -> Result<(), SnapshotError> {
        Err(SnapshotError::Write("store unavailable".to_string()))
    }
}

pub(super) fn certificate_doc(name: &str) -> Value {
    json!({ "name": name })
}

pub(super) fn program_doc(name: &str, prerequisites: Value) -> Value {
    json!({ "name": name, "prerequisites": prerequisites })
}
