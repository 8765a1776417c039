use axum::body::{Body, to_bytes};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::Response;
use serde::Deserialize;

use crate::application::services::NewDocument;
use crate::domain::{DocumentFile, OwnerReference};
use crate::presentation::state::AppState;

use super::responses::{error_response, spawn_run, trigger_error_response};

#[derive(Debug, Deserialize)]
pub struct UploadParams {
    pub filename: String,
    pub owner_type: Option<String>,
    pub owner_id: Option<String>,
}

impl UploadParams {
    fn owner(&self) -> Option<OwnerReference> {
        match (self.owner_type.as_deref(), self.owner_id.as_deref()) {
            (Some(entity_type), Some(id)) if !entity_type.is_empty() && !id.is_empty() => {
                Some(OwnerReference::new(entity_type, id))
            }
            _ => None,
        }
    }
}

/// Accepts a raw file body and starts the initial analysis run.
///
/// A declared `Content-Length` above the configured maximum is validated from
/// metadata alone, so the rejection reason reaches the caller without the body
/// being buffered.
#[tracing::instrument(skip_all, fields(filename = %params.filename))]
pub async fn upload_document_handler(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    if params.filename.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "filename is required");
    }

    let mime_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let declared_size = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    let file = match declared_size
        .map(|size| DocumentFile::declared(params.filename.clone(), mime_type.clone(), size))
    {
        Some(declared) if declared.size_mb() > state.analyzer_config.max_file_size_mb => {
            tracing::info!(bytes = declared.size_bytes, "Upload declared over the size limit");
            declared
        }
        _ => match to_bytes(body, state.upload_limit_bytes).await {
            Ok(bytes) => DocumentFile::new(params.filename.clone(), mime_type, bytes),
            Err(e) => {
                tracing::warn!(error = %e, "Upload body rejected");
                return error_response(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "upload body exceeds the size limit or could not be read",
                );
            }
        },
    };

    let document = NewDocument {
        owner: params.owner(),
        file,
    };

    match state.controller.submit_file(document, state.run_config()) {
        Ok(run) => spawn_run(run),
        Err(e) => trigger_error_response(e),
    }
}
