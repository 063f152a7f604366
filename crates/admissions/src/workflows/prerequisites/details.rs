use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::domain::{Certificate, Program, CERTIFICATES};
use super::store::{SnapshotError, SnapshotStore};
use super::view::{DetailsView, PrerequisiteFormView, SkeletonLayout};

/// Identifiers read from the admin page query string. Both must be present
/// before any fetch is attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub certificate: Option<String>,
    pub id: Option<String>,
}

impl QueryParams {
    /// Parse `certificate` (certificate id) and `id` (program id) from a raw
    /// query string. Unknown keys and empty values are ignored.
    pub fn parse(query: &str) -> Self {
        let mut params = Self::default();
        for pair in query.trim_start_matches('?').split('&') {
            match pair.split_once('=') {
                Some(("certificate", value)) if !value.is_empty() => {
                    params.certificate = Some(value.to_string());
                }
                Some(("id", value)) if !value.is_empty() => {
                    params.id = Some(value.to_string());
                }
                _ => {}
            }
        }
        params
    }

    fn both(&self) -> Option<(&str, &str)> {
        match (self.certificate.as_deref(), self.id.as_deref()) {
            (Some(certificate), Some(program)) => Some((certificate, program)),
            _ => None,
        }
    }
}

/// Cancellation guard scoped to a component's lifetime. Checked after every
/// suspension point, before any state mutation.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Certificate-load lifecycle for the prerequisite details page.
#[derive(Debug)]
pub enum DetailsState {
    /// One or both identifiers are missing; nothing is fetched.
    Idle,
    /// Both identifiers present, certificate read in flight.
    Loading,
    Loaded(Certificate),
    /// The read failed or found nothing. The rendered view intentionally
    /// stays on the skeleton; integrators choose a failure UI from here.
    Failed(SnapshotError),
}

/// Details page for a program's prerequisites, hydrated by a one-shot
/// certificate read.
pub struct PrerequisiteDetails {
    params: QueryParams,
    state: DetailsState,
    store: Arc<dyn SnapshotStore>,
    cancel: CancelToken,
}

impl PrerequisiteDetails {
    pub fn new(params: QueryParams, store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            params,
            state: DetailsState::Idle,
            store,
            cancel: CancelToken::new(),
        }
    }

    /// Token to cancel this component's in-flight load at teardown.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn state(&self) -> &DetailsState {
        &self.state
    }

    pub fn program_id(&self) -> Option<&str> {
        self.params.id.as_deref()
    }

    /// Run the one-shot certificate read. A no-op while either identifier is
    /// missing. Loading transitions to `Loaded` exactly once on success; a
    /// cancelled load mutates nothing after its suspension point.
    pub async fn load(&mut self) -> &DetailsState {
        let Some((certificate_id, _program_id)) = self.params.both() else {
            self.state = DetailsState::Idle;
            return &self.state;
        };
        let certificate_id = certificate_id.to_string();
        self.state = DetailsState::Loading;

        let fetched = self.store.fetch(CERTIFICATES, &certificate_id).await;
        if self.cancel.is_cancelled() {
            return &self.state;
        }

        self.state = match fetched {
            Ok(Some(snapshot)) => match Certificate::from_snapshot(&snapshot) {
                Ok(certificate) => DetailsState::Loaded(certificate),
                Err(err) => DetailsState::Failed(err),
            },
            Ok(None) => DetailsState::Failed(SnapshotError::Read(format!(
                "certificate '{certificate_id}' not found"
            ))),
            Err(err) => DetailsState::Failed(err),
        };
        &self.state
    }

    /// Current render model. Failures keep the skeleton on screen; the error
    /// itself is observable only through [`PrerequisiteDetails::state`].
    pub fn render(&self, program: Option<&Program>) -> DetailsView {
        match &self.state {
            DetailsState::Idle => DetailsView::Empty,
            DetailsState::Loading | DetailsState::Failed(_) => {
                DetailsView::Skeleton(SkeletonLayout::default())
            }
            DetailsState::Loaded(certificate) => DetailsView::Form(PrerequisiteFormView {
                certificate: certificate.clone(),
                prerequisites: program
                    .map(|program| program.prerequisites.clone())
                    .unwrap_or_default(),
            }),
        }
    }
}
