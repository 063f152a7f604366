use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::notify::Notifier;

use super::domain::{DocumentFile, DocumentType, StagedDocument};
use super::form::{DocumentForm, DocumentFormError};
use super::storage::{DocumentStore, ObjectStorage};

/// Collaborators handed to every intake request.
#[derive(Clone)]
pub struct DocumentRouterState {
    pub objects: Arc<dyn ObjectStorage>,
    pub documents: Arc<dyn DocumentStore>,
    pub notifier: Arc<dyn Notifier>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DocumentPayload {
    #[serde(rename = "type")]
    doc_type: DocumentType,
    file_name: String,
    bytes: Vec<u8>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitDocumentsRequest {
    documents: Vec<DocumentPayload>,
}

/// Router builder exposing the applicant document submission endpoint.
pub fn document_router(state: DocumentRouterState) -> Router {
    Router::new()
        .route(
            "/api/v1/applications/:application_id/documents",
            post(submit_documents_handler),
        )
        .with_state(state)
}

pub(crate) async fn submit_documents_handler(
    State(state): State<DocumentRouterState>,
    Path(application_id): Path<i64>,
    Json(request): Json<SubmitDocumentsRequest>,
) -> Response {
    let mut form = DocumentForm::new(
        application_id,
        state.objects.clone(),
        state.documents.clone(),
        state.notifier.clone(),
    );

    for payload in request.documents {
        let file = DocumentFile {
            name: payload.file_name,
            bytes: payload.bytes,
        };
        let staged = match StagedDocument::new(payload.doc_type, file) {
            Ok(staged) => staged,
            Err(err) => {
                let body = Json(json!({ "error": err.to_string() }));
                return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
            }
        };
        if let Err(err) = form.stage(staged) {
            let body = Json(json!({ "error": err.to_string() }));
            return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
        }
    }

    match form.submit().await {
        Ok(outcome) => {
            let body = Json(json!({
                "persisted": outcome.persisted,
                "redirect": outcome.redirect,
            }));
            (StatusCode::CREATED, body).into_response()
        }
        Err(err @ DocumentFormError::Empty) => {
            let body = Json(json!({ "error": err.to_string() }));
            (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
        }
        Err(err) => {
            let body = Json(json!({ "error": err.to_string() }));
            (StatusCode::BAD_GATEWAY, body).into_response()
        }
    }
}
