use serde::Serialize;

use super::domain::{Certificate, Prerequisite};

/// Placeholder sized to approximate the loaded content: two header blocks
/// over three row blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkeletonLayout {
    pub header_blocks: usize,
    pub row_blocks: usize,
}

impl Default for SkeletonLayout {
    fn default() -> Self {
        Self {
            header_blocks: 2,
            row_blocks: 3,
        }
    }
}

/// Form contents once the certificate has loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrerequisiteFormView {
    pub certificate: Certificate,
    pub prerequisites: Vec<Prerequisite>,
}

/// What the details page shows for each lifecycle state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DetailsView {
    Empty,
    Skeleton(SkeletonLayout),
    Form(PrerequisiteFormView),
}
