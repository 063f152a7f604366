//! Admin-side prerequisite management: a one-shot certificate read gating the
//! prerequisite form, plus a live mirror of the owning program document.

pub mod details;
pub mod domain;
pub mod form;
pub mod store;
pub mod view;
pub mod watch;

#[cfg(test)]
mod tests;

pub use details::{CancelToken, DetailsState, PrerequisiteDetails, QueryParams};
pub use domain::{Certificate, Prerequisite, Program, CERTIFICATES, PROGRAMS};
pub use form::PrerequisiteForm;
pub use store::{Snapshot, SnapshotError, SnapshotStore, Subscription};
pub use view::{DetailsView, PrerequisiteFormView, SkeletonLayout};
pub use watch::ProgramWatcher;
