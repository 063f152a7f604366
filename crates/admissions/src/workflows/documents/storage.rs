use async_trait::async_trait;

use super::domain::{DocumentFile, DocumentRecord};

/// Failures surfaced by the external storage collaborators.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("upload failed: {0}")]
    Upload(String),
    #[error("metadata persistence failed: {0}")]
    Persist(String),
}

/// Object storage accepting a binary file and returning a reference URL.
/// The upload must complete before metadata persistence is attempted.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(&self, file: &DocumentFile) -> Result<String, StorageError>;
}

/// Relational-store facade recording one metadata row per persisted document.
/// No return value beyond success is consumed.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn create(&self, record: DocumentRecord) -> Result<(), StorageError>;
}
