use serde::{Deserialize, Serialize};

use super::store::{Snapshot, SnapshotError};

/// Collection names used by the admin views.
pub const CERTIFICATES: &str = "certificates";
pub const PROGRAMS: &str = "programs";

/// Credential a program can issue once its prerequisites are met.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    #[serde(default)]
    pub id: String,
    pub name: String,
}

impl Certificate {
    /// Decode a store snapshot, overlaying the document id onto the payload.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, SnapshotError> {
        let mut certificate: Certificate = serde_json::from_value(snapshot.data.clone())
            .map_err(|err| SnapshotError::Decode(err.to_string()))?;
        certificate.id = snapshot.id.clone();
        Ok(certificate)
    }
}

/// Requirement attached to a program, gating issuance of one certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prerequisite {
    pub id: String,
    pub certificate_id: String,
    pub name: String,
}

/// Thin client-side mirror of a program document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub prerequisites: Vec<Prerequisite>,
}

impl Program {
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, SnapshotError> {
        let mut program: Program = serde_json::from_value(snapshot.data.clone())
            .map_err(|err| SnapshotError::Decode(err.to_string()))?;
        program.id = snapshot.id.clone();
        Ok(program)
    }
}
