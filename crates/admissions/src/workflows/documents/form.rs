use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};

use crate::notify::{Notification, Notifier};

use super::domain::{DocumentRecord, DocumentType, StagedDocument};
use super::storage::{DocumentStore, ObjectStorage, StorageError};

/// Errors reported by the staging and submission workflow.
#[derive(Debug, thiserror::Error)]
pub enum DocumentFormError {
    #[error("a '{}' document is already staged", .0.label())]
    DuplicateType(DocumentType),
    #[error("no documents staged")]
    Empty,
    #[error("{failed} of {attempted} documents failed to upload")]
    BatchFailed { attempted: usize, failed: usize },
}

/// Result of a successful submission, including where to send the user next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub persisted: usize,
    pub redirect: &'static str,
}

/// Holds the staged document set for one application and drives the
/// upload-then-persist batch. At most one document per type may be staged;
/// staged entries vanish with the form if never submitted.
pub struct DocumentForm {
    application_id: i64,
    staged: Vec<StagedDocument>,
    objects: Arc<dyn ObjectStorage>,
    documents: Arc<dyn DocumentStore>,
    notifier: Arc<dyn Notifier>,
}

impl DocumentForm {
    pub fn new(
        application_id: i64,
        objects: Arc<dyn ObjectStorage>,
        documents: Arc<dyn DocumentStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            application_id,
            staged: Vec::new(),
            objects,
            documents,
            notifier,
        }
    }

    pub fn staged(&self) -> &[StagedDocument] {
        &self.staged
    }

    pub fn is_type_staged(&self, doc_type: DocumentType) -> bool {
        self.staged.iter().any(|doc| doc.doc_type() == doc_type)
    }

    /// Stage a validated document. When the type is already taken the set is
    /// left unchanged and a warning is surfaced; there is no overwrite.
    pub fn stage(&mut self, document: StagedDocument) -> Result<(), DocumentFormError> {
        if self.is_type_staged(document.doc_type()) {
            self.notifier.notify(Notification::warning(
                "Document type already added",
                "Please remove the existing document first.",
            ));
            return Err(DocumentFormError::DuplicateType(document.doc_type()));
        }
        self.staged.push(document);
        Ok(())
    }

    /// Remove the staged document of the given type, if any.
    pub fn remove(&mut self, doc_type: DocumentType) {
        self.staged.retain(|doc| doc.doc_type() != doc_type);
    }

    /// Upload every staged document and record its metadata.
    ///
    /// Per-document operations run concurrently with no ordering guarantee,
    /// and every item is attempted even when another fails. Failures are
    /// reported only in aggregate; records persisted for successful items are
    /// not rolled back when the batch as a whole fails.
    pub async fn submit(&self) -> Result<SubmitOutcome, DocumentFormError> {
        if self.staged.is_empty() {
            self.notifier.notify(Notification::warning(
                "No documents",
                "Please add at least one document before proceeding.",
            ));
            return Err(DocumentFormError::Empty);
        }

        let uploads = self.staged.iter().map(|doc| self.upload_one(doc));
        let results: Vec<Result<(), StorageError>> = join_all(uploads).await;

        let failed = results.iter().filter(|result| result.is_err()).count();
        if failed > 0 {
            for err in results.iter().filter_map(|result| result.as_ref().err()) {
                warn!(application_id = self.application_id, %err, "document upload failed");
            }
            self.notifier.notify(Notification::error(
                "Error",
                "Failed to upload documents. Please try again.",
            ));
            return Err(DocumentFormError::BatchFailed {
                attempted: results.len(),
                failed,
            });
        }

        info!(
            application_id = self.application_id,
            count = results.len(),
            "documents persisted"
        );
        self.notifier.notify(Notification::success(
            "Success",
            "Documents uploaded successfully",
        ));
        Ok(SubmitOutcome {
            persisted: results.len(),
            redirect: "/",
        })
    }

    async fn upload_one(&self, document: &StagedDocument) -> Result<(), StorageError> {
        let url = self.objects.upload(document.file()).await?;
        self.documents
            .create(DocumentRecord {
                application_id: self.application_id,
                file_name: document.file().name.clone(),
                url,
                doc_type: document.doc_type(),
            })
            .await
    }
}
