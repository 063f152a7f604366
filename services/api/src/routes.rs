use crate::infra::AppState;
use admissions::config::AppEnvironment;
use admissions::error::AppError;
use admissions::workflows::documents::{document_router, DocumentRouterState};
use admissions::workflows::prerequisites::{
    DetailsView, PrerequisiteDetails, Program, QueryParams, PROGRAMS,
};
use axum::extract::RawQuery;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;

pub(crate) fn app_router(document_state: DocumentRouterState) -> axum::Router {
    document_router(document_state)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/ui/context", axum::routing::get(ui_context_endpoint))
        .route(
            "/api/v1/programs/prerequisites",
            axum::routing::get(prerequisite_details_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Page-shell context: the fixed default theme, the key clients persist an
/// override under, and whether the inspection overlay should mount.
pub(crate) async fn ui_context_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    Json(json!({
        "theme": state.ui.default_theme.label(),
        "storage_key": state.ui.theme_storage_key,
        "devtools": state.environment == AppEnvironment::Development,
    }))
}

/// Prerequisite details read path. Mirrors the admin page lifecycle: renders
/// nothing until both query identifiers are present, a skeleton while the
/// certificate read is unresolved or failed, and the form once loaded. A
/// store outage while hydrating the program mirror surfaces as [`AppError`].
pub(crate) async fn prerequisite_details_endpoint(
    Extension(state): Extension<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<DetailsView>, AppError> {
    let params = QueryParams::parse(query.as_deref().unwrap_or(""));
    let mut details = PrerequisiteDetails::new(params, state.snapshots.clone());
    details.load().await;

    let program = match details.program_id() {
        Some(program_id) => state
            .snapshots
            .fetch(PROGRAMS, program_id)
            .await?
            .and_then(|snapshot| Program::from_snapshot(&snapshot).ok()),
        None => None,
    };

    Ok(Json(details.render(program.as_ref())))
}
