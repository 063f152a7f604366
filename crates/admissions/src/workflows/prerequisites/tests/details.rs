use std::sync::Arc;

use super::common::*;
use crate::workflows::prerequisites::details::{DetailsState, PrerequisiteDetails, QueryParams};
use crate::workflows::prerequisites::domain::CERTIFICATES;
use crate::workflows::prerequisites::store::SnapshotError;
use crate::workflows::prerequisites::view::DetailsView;

#[test]
fn query_params_parse_both_identifiers() {
    let params = QueryParams::parse("?certificate=cert-9&id=prog-4");
    assert_eq!(params.certificate.as_deref(), Some("cert-9"));
    assert_eq!(params.id.as_deref(), Some("prog-4"));
}

#[test]
fn query_params_ignore_unknown_keys_and_empty_values() {
    let params = QueryParams::parse("certificate=&id=prog-4&tab=settings");
    assert_eq!(params.certificate, None);
    assert_eq!(params.id.as_deref(), Some("prog-4"));
}

#[tokio::test]
async fn missing_identifiers_fetch_nothing_and_render_empty() {
    let store = Arc::new(MemoryRealtimeStore::default());
    let params = QueryParams::parse("certificate=cert-1");
    let mut details = PrerequisiteDetails::new(params, store.clone());

    details.load().await;

    assert!(matches!(details.state(), DetailsState::Idle));
    assert_eq!(details.render(None), DetailsView::Empty);
    assert_eq!(store.fetch_count(), 0);
}

#[tokio::test]
async fn successful_load_transitions_to_loaded_once() {
    let store = Arc::new(MemoryRealtimeStore::default());
    store.seed(CERTIFICATES, "cert-1", certificate_doc("Nursing Diploma"));
    let params = QueryParams::parse("certificate=cert-1&id=prog-4");
    let mut details = PrerequisiteDetails::new(params, store.clone());

    details.load().await;

    match details.state() {
        DetailsState::Loaded(certificate) => {
            assert_eq!(certificate.id, "cert-1");
            assert_eq!(certificate.name, "Nursing Diploma");
        }
        other => panic!("expected loaded state, got {other:?}"),
    }
    assert_eq!(store.fetch_count(), 1);

    match details.render(None) {
        DetailsView::Form(view) => {
            assert_eq!(view.certificate.name, "Nursing Diploma");
            assert!(view.prerequisites.is_empty());
        }
        other => panic!("expected form view, got {other:?}"),
    }
}

#[tokio::test]
async fn fetch_failure_keeps_the_skeleton_on_screen() {
    let params = QueryParams::parse("certificate=cert-1&id=prog-4");
    let mut details = PrerequisiteDetails::new(params, Arc::new(UnavailableStore));

    details.load().await;

    // The error is recorded, but the rendered view never leaves the skeleton.
    assert!(matches!(
        details.state(),
        DetailsState::Failed(SnapshotError::Read(_))
    ));
    match details.render(None) {
        DetailsView::Skeleton(layout) => {
            assert_eq!(layout.header_blocks, 2);
            assert_eq!(layout.row_blocks, 3);
        }
        other => panic!("expected skeleton view, got {other:?}"),
    }
}

#[tokio::test]
async fn absent_certificate_is_a_failed_read() {
    let store = Arc::new(MemoryRealtimeStore::default());
    let params = QueryParams::parse("certificate=cert-unknown&id=prog-4");
    let mut details = PrerequisiteDetails::new(params, store);

    details.load().await;

    assert!(matches!(details.state(), DetailsState::Failed(_)));
    assert!(matches!(details.render(None), DetailsView::Skeleton(_)));
}

#[tokio::test]
async fn cancelled_load_applies_no_state_after_the_fetch() {
    let store = Arc::new(MemoryRealtimeStore::default());
    store.seed(CERTIFICATES, "cert-1", certificate_doc("Nursing Diploma"));
    let params = QueryParams::parse("certificate=cert-1&id=prog-4");
    let mut details = PrerequisiteDetails::new(params, store);

    details.cancel_token().cancel();
    details.load().await;

    // The fetch resolved, but the cancelled component never leaves Loading.
    assert!(matches!(details.state(), DetailsState::Loading));
    assert!(matches!(details.render(None), DetailsView::Skeleton(_)));
}
