use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::notify::{Notification, Notifier};
use crate::workflows::documents::domain::{
    DocumentFile, DocumentRecord, DocumentType, StagedDocument,
};
use crate::workflows::documents::form::DocumentForm;
use crate::workflows::documents::storage::{DocumentStore, ObjectStorage, StorageError};

/// Object storage fake recording every upload and answering with either a
/// preset URL or a deterministic one derived from the file name.
#[derive(Default)]
pub(super) struct MemoryObjectStorage {
    preset_urls: Mutex<HashMap<String, String>>,
    uploads: Mutex<Vec<String>>,
    fail_for: Mutex<Option<String>>,
}

impl MemoryObjectStorage {
    pub(super) fn preset_url(&self, file_name: &str, url: &str) {
        self.preset_urls
            .lock()
            .expect("url mutex poisoned")
            .insert(file_name.to_string(), url.to_string());
    }

    /// Make uploads of the named file fail; all other uploads still succeed.
    pub(super) fn fail_for(&self, file_name: &str) {
        *self.fail_for.lock().expect("failure mutex poisoned") = Some(file_name.to_string());
    }

    pub(super) fn uploads(&self) -> Vec<String> {
        self.uploads.lock().expect("upload mutex poisoned").clone()
    }
}

#[async_trait]
impl ObjectStorage for MemoryObjectStorage {
    async fn upload(&self, file: &DocumentFile) -> Result<String, StorageError> {
        self.uploads
            .lock()
            .expect("upload mutex poisoned")
            .push(file.name.clone());

        if self
            .fail_for
            .lock()
            .expect("failure mutex poisoned")
            .as_deref()
            == Some(file.name.as_str())
        {
            return Err(StorageError::Upload(format!(
                "injected failure for '{}'",
                file.name
            )));
        }

        let preset = self
            .preset_urls
            .lock()
            .expect("url mutex poisoned")
            .get(&file.name)
            .cloned();
        Ok(preset.unwrap_or_else(|| format!("https://store/{}", file.name)))
    }
}

/// Metadata store fake collecting persisted records.
#[derive(Default)]
pub(super) struct MemoryDocumentStore {
    records: Mutex<Vec<DocumentRecord>>,
}

impl MemoryDocumentStore {
    pub(super) fn records(&self) -> Vec<DocumentRecord> {
        self.records.lock().expect("record mutex poisoned").clone()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create(&self, record: DocumentRecord) -> Result<(), StorageError> {
        self.records
            .lock()
            .expect("record mutex poisoned")
            .push(record);
        Ok(())
    }
}

/// Notification recorder standing in for the toast rail.
#[derive(Default)]
pub(super) struct MemoryNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub(super) fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .expect("notification mutex poisoned")
            .clone()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications
            .lock()
            .expect("notification mutex poisoned")
            .push(notification);
    }
}

pub(super) struct TestHarness {
    pub(super) objects: Arc<MemoryObjectStorage>,
    pub(super) documents: Arc<MemoryDocumentStore>,
    pub(super) notifier: Arc<MemoryNotifier>,
}

impl TestHarness {
    pub(super) fn new() -> Self {
        Self {
            objects: Arc::new(MemoryObjectStorage::default()),
            documents: Arc::new(MemoryDocumentStore::default()),
            notifier: Arc::new(MemoryNotifier::default()),
        }
    }

    pub(super) fn form(&self, application_id: i64) -> DocumentForm {
        DocumentForm::new(
            application_id,
            self.objects.clone(),
            self.documents.clone(),
            self.notifier.clone(),
        )
    }
}

pub(super) fn staged(doc_type: DocumentType, file_name: &str, size: usize) -> StagedDocument {
    StagedDocument::new(
        doc_type,
        DocumentFile {
            name: file_name.to_string(),
            bytes: vec![0u8; size],
        },
    )
    .expect("document under the size cap stages")
}
