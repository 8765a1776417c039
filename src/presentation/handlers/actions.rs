use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::presentation::state::AppState;

use super::responses::{spawn_run, trigger_error_response};

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub language: String,
}

#[derive(Serialize)]
pub struct CancelResponse {
    pub cancelled: bool,
}

pub async fn regenerate_handler(State(state): State<AppState>) -> Response {
    match state.controller.regenerate(state.run_config()) {
        Ok(run) => spawn_run(run),
        Err(e) => trigger_error_response(e),
    }
}

pub async fn expand_handler(State(state): State<AppState>) -> Response {
    match state.controller.expand(state.run_config()) {
        Ok(run) => spawn_run(run),
        Err(e) => trigger_error_response(e),
    }
}

#[tracing::instrument(skip(state, request), fields(language = %request.language))]
pub async fn translate_handler(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Response {
    match state
        .controller
        .translate(&request.language, state.run_config())
    {
        Ok(run) => spawn_run(run),
        Err(e) => trigger_error_response(e),
    }
}

pub async fn reset_handler(State(state): State<AppState>) -> Response {
    match state.controller.reset() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => trigger_error_response(e),
    }
}

pub async fn cancel_handler(State(state): State<AppState>) -> Response {
    let cancelled = state.controller.cancel();
    (StatusCode::OK, Json(CancelResponse { cancelled })).into_response()
}
