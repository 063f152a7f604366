use tracing::warn;

use super::domain::{Program, PROGRAMS};
use super::store::{SnapshotStore, Subscription};

/// Live mirror of one program document.
///
/// Holds the subscription for as long as remote updates should apply to
/// local state; `stop` releases it, after which remote changes are never
/// observed again. Dropping the watcher releases the subscription too.
pub struct ProgramWatcher {
    subscription: Option<Subscription>,
    program: Option<Program>,
}

impl ProgramWatcher {
    pub fn start(store: &dyn SnapshotStore, program_id: &str) -> Self {
        Self {
            subscription: Some(store.subscribe(PROGRAMS, program_id)),
            program: None,
        }
    }

    pub fn program(&self) -> Option<&Program> {
        self.program.as_ref()
    }

    pub fn is_stopped(&self) -> bool {
        self.subscription.is_none()
    }

    /// Wait for and apply the next remote snapshot. Returns `false` once the
    /// stream has closed or the watcher was stopped.
    pub async fn apply_next(&mut self) -> bool {
        let Some(subscription) = self.subscription.as_mut() else {
            return false;
        };
        match subscription.next().await {
            Some(snapshot) => {
                self.apply(snapshot);
                true
            }
            None => false,
        }
    }

    /// Apply every already-delivered snapshot without waiting, returning how
    /// many were applied.
    pub fn apply_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Some(snapshot) = self
            .subscription
            .as_mut()
            .and_then(|subscription| subscription.try_next())
        {
            self.apply(snapshot);
            applied += 1;
        }
        applied
    }

    fn apply(&mut self, snapshot: super::store::Snapshot) {
        match Program::from_snapshot(&snapshot) {
            Ok(program) => self.program = Some(program),
            Err(err) => warn!(document_id = %snapshot.id, %err, "ignoring undecodable program snapshot"),
        }
    }

    /// Release the subscription. Further remote changes are not observed.
    pub fn stop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl Drop for ProgramWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}
