//! Applicant document intake: staging, validation, upload, and metadata
//! persistence. Staged documents live only in form state; durable records
//! are created by the injected storage collaborators.

pub mod domain;
pub mod form;
pub mod router;
pub mod storage;

#[cfg(test)]
mod tests;

pub use domain::{
    DocumentFile, DocumentRecord, DocumentType, DocumentValidationError, StagedDocument,
    MAX_DOCUMENT_BYTES,
};
pub use form::{DocumentForm, DocumentFormError, SubmitOutcome};
pub use router::{document_router, DocumentRouterState};
pub use storage::{DocumentStore, ObjectStorage, StorageError};
