use serde::{Deserialize, Serialize};

/// Document kinds an applicant may attach to an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Transcript,
    IdentityDocument,
    Certificate,
    ProofOfResidence,
    RecommendationLetter,
}

impl DocumentType {
    pub const ALL: [DocumentType; 5] = [
        DocumentType::Transcript,
        DocumentType::IdentityDocument,
        DocumentType::Certificate,
        DocumentType::ProofOfResidence,
        DocumentType::RecommendationLetter,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            DocumentType::Transcript => "transcript",
            DocumentType::IdentityDocument => "identity_document",
            DocumentType::Certificate => "certificate",
            DocumentType::ProofOfResidence => "proof_of_residence",
            DocumentType::RecommendationLetter => "recommendation_letter",
        }
    }
}

/// Uploads at or above this size are rejected before any network call.
pub const MAX_DOCUMENT_BYTES: usize = 5 * 1024 * 1024;

/// Raw file contents plus the name reported by the picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl DocumentFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentValidationError {
    #[error("file '{name}' is {size} bytes; documents must be smaller than 5MB")]
    Oversize { name: String, size: usize },
}

/// A validated, not-yet-persisted document held in form state. Constructed
/// only through [`StagedDocument::new`] so every staged entry has already
/// passed the size check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedDocument {
    doc_type: DocumentType,
    file: DocumentFile,
}

impl StagedDocument {
    pub fn new(
        doc_type: DocumentType,
        file: DocumentFile,
    ) -> Result<Self, DocumentValidationError> {
        let size = file.size();
        if size >= MAX_DOCUMENT_BYTES {
            return Err(DocumentValidationError::Oversize {
                name: file.name,
                size,
            });
        }
        Ok(Self { doc_type, file })
    }

    pub fn doc_type(&self) -> DocumentType {
        self.doc_type
    }

    pub fn file(&self) -> &DocumentFile {
        &self.file
    }
}

/// Metadata row recorded after a successful upload. From this point on the
/// document lives only in the external stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub application_id: i64,
    pub file_name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
}
