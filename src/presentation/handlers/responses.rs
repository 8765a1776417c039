use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{PipelineRun, TriggerError};
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunAccepted {
    pub run_id: u64,
    pub action: &'static str,
    pub state: &'static str,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

pub fn trigger_error_response(err: TriggerError) -> Response {
    let status = match &err {
        TriggerError::Busy | TriggerError::InvalidState { .. } => StatusCode::CONFLICT,
        TriggerError::InvalidFile(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TriggerError::MissingLanguage => StatusCode::BAD_REQUEST,
    };
    tracing::warn!(status = %status, error = %err, "Trigger rejected");
    error_response(status, err.to_string())
}

/// Runs the admitted job in the background and answers 202.
pub fn spawn_run(run: PipelineRun) -> Response {
    let body = RunAccepted {
        run_id: run.run_id(),
        action: run.action().as_str(),
        state: "processing",
    };

    tokio::spawn(async move {
        let state = run.execute().await;
        tracing::debug!(state = state.name(), "Background run finished");
    });

    (StatusCode::ACCEPTED, Json(body)).into_response()
}
