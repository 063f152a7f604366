use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use admissions::config::{AppEnvironment, UiConfig};
use admissions::notify::{Notification, Notifier, Severity};
use admissions::workflows::documents::{
    DocumentFile, DocumentRecord, DocumentStore, ObjectStorage, StorageError,
};
use admissions::workflows::prerequisites::{
    Snapshot, SnapshotError, SnapshotStore, Subscription,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) environment: AppEnvironment,
    pub(crate) ui: UiConfig,
    pub(crate) snapshots: Arc<dyn SnapshotStore>,
}

/// Object storage stand-in handing out sequential reference URLs.
#[derive(Default)]
pub(crate) struct InMemoryObjectStorage {
    sequence: AtomicU64,
    uploads: Mutex<Vec<(String, usize)>>,
}

impl InMemoryObjectStorage {
    pub(crate) fn uploads(&self) -> Vec<(String, usize)> {
        self.uploads.lock().expect("upload mutex poisoned").clone()
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn upload(&self, file: &DocumentFile) -> Result<String, StorageError> {
        self.uploads
            .lock()
            .expect("upload mutex poisoned")
            .push((file.name.clone(), file.size()));
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(format!("https://store/obj-{sequence:06}"))
    }
}

/// Metadata store stand-in collecting persisted document rows.
#[derive(Default)]
pub(crate) struct InMemoryDocumentStore {
    records: Mutex<Vec<DocumentRecord>>,
}

impl InMemoryDocumentStore {
    pub(crate) fn records(&self) -> Vec<DocumentRecord> {
        self.records.lock().expect("record mutex poisoned").clone()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create(&self, record: DocumentRecord) -> Result<(), StorageError> {
        self.records
            .lock()
            .expect("record mutex poisoned")
            .push(record);
        Ok(())
    }
}

type Key = (String, String);

/// Realtime document store adapter: documents in a map, one snapshot fan-out
/// per write to every live subscriber.
#[derive(Default)]
pub(crate) struct InMemoryRealtimeStore {
    docs: Mutex<HashMap<Key, Value>>,
    subscribers: Mutex<HashMap<Key, Vec<mpsc::UnboundedSender<Snapshot>>>>,
}

impl InMemoryRealtimeStore {
    pub(crate) fn seed(&self, collection: &str, id: &str, data: Value) {
        self.docs
            .lock()
            .expect("docs mutex poisoned")
            .insert((collection.to_string(), id.to_string()), data);
    }

    fn fan_out(&self, key: &Key, snapshot: Snapshot) {
        let mut subscribers = self.subscribers.lock().expect("subscriber mutex poisoned");
        if let Some(senders) = subscribers.get_mut(key) {
            senders.retain(|sender| sender.send(snapshot.clone()).is_ok());
        }
    }
}

#[async_trait]
impl SnapshotStore for InMemoryRealtimeStore {
    async fn fetch(&self, collection: &str, id: &str) -> Result<Option<Snapshot>, SnapshotError> {
        let docs = self.docs.lock().expect("docs mutex poisoned");
        Ok(docs
            .get(&(collection.to_string(), id.to_string()))
            .cloned()
            .map(|data| Snapshot {
                id: id.to_string(),
                data,
            }))
    }

    fn subscribe(&self, collection: &str, id: &str) -> Subscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .expect("subscriber mutex poisoned")
            .entry((collection.to_string(), id.to_string()))
            .or_default()
            .push(sender);
        Subscription::new(receiver)
    }

    async fn put(&self, collection: &str, id: &str, data: Value) -> Result<(), SnapshotError> {
        let key = (collection.to_string(), id.to_string());
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

/// Notification sink that forwards toasts to the service log.
#[derive(Default, Clone)]
pub(crate) struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Success => {
                info!(title = %notification.title, "{}", notification.description)
            }
            Severity::Warning => {
                warn!(title = %notification.title, "{}", notification.description)
            }
            Severity::Error => {
                error!(title = %notification.title, "{}", notification.description)
            }
        }
    }
}
