use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::domain::{Certificate, Prerequisite, Program, PROGRAMS};
use super::store::{SnapshotError, SnapshotStore};

static PREREQUISITE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_prerequisite_id() -> String {
    let id = PREREQUISITE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("prereq-{id:06}")
}

/// Admin CRUD over a program's prerequisites, scoped to a loaded certificate.
/// Every mutation rewrites the program document through the store, which fans
/// the new snapshot out to live subscribers.
pub struct PrerequisiteForm {
    certificate: Certificate,
    program_id: String,
    store: Arc<dyn SnapshotStore>,
}

impl PrerequisiteForm {
    pub fn new(
        certificate: Certificate,
        program_id: impl Into<String>,
        store: Arc<dyn SnapshotStore>,
    ) -> Self {
        Self {
            certificate,
            program_id: program_id.into(),
            store,
        }
    }

    pub fn certificate(&self) -> &Certificate {
        &self.certificate
    }

    /// Prerequisites of the program that gate this certificate.
    pub async fn list(&self) -> Result<Vec<Prerequisite>, SnapshotError> {
        let program = self.load_program().await?;
        Ok(program
            .prerequisites
            .into_iter()
            .filter(|prerequisite| prerequisite.certificate_id == self.certificate.id)
            .collect())
    }

    /// Append a prerequisite for this certificate and write the program back.
    pub async fn add(&self, name: impl Into<String>) -> Result<Prerequisite, SnapshotError> {
        let mut program = self.load_program().await?;
        let prerequisite = Prerequisite {
            id: next_prerequisite_id(),
            certificate_id: self.certificate.id.clone(),
            name: name.into(),
        };
        program.prerequisites.push(prerequisite.clone());
        self.save(program).await?;
        Ok(prerequisite)
    }

    /// Rename an existing prerequisite.
    pub async fn rename(
        &self,
        prerequisite_id: &str,
        name: impl Into<String>,
    ) -> Result<(), SnapshotError> {
        let mut program = self.load_program().await?;
        let entry = program
            .prerequisites
            .iter_mut()
            .find(|prerequisite| prerequisite.id == prerequisite_id)
            .ok_or_else(|| {
                SnapshotError::Write(format!("prerequisite '{prerequisite_id}' not found"))
            })?;
        entry.name = name.into();
        self.save(program).await
    }

    /// Delete a prerequisite by id. Removing an unknown id is a no-op write.
    pub async fn remove(&self, prerequisite_id: &str) -> Result<(), SnapshotError> {
        let mut program = self.load_program().await?;
        program
            .prerequisites
            .retain(|prerequisite| prerequisite.id != prerequisite_id);
        self.save(program).await
    }

    async fn load_program(&self) -> Result<Program, SnapshotError> {
        let snapshot = self
            .store
            .fetch(PROGRAMS, &self.program_id)
            .await?
            .ok_or_else(|| {
                SnapshotError::Read(format!("program '{}' not found", self.program_id))
            })?;
        Program::from_snapshot(&snapshot)
    }

    async fn save(&self, program: Program) -> Result<(), SnapshotError> {
        let data = serde_json::to_value(&program)
            .map_err(|err| SnapshotError::Write(err.to_string()))?;
        self.store.put(PROGRAMS, &self.program_id, data).await
    }
}
