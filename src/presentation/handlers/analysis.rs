use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::domain::{DocumentAnalysis, PipelineState, format_summary};
use crate::presentation::state::AppState;

/// What the host UI renders for the current state.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisView {
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<DocumentAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorView>,
}

#[derive(Debug, Serialize)]
pub struct ErrorView {
    pub kind: &'static str,
    pub title: String,
    pub message: String,
}

impl From<&PipelineState> for AnalysisView {
    fn from(state: &PipelineState) -> Self {
        let mut view = AnalysisView {
            state: state.name(),
            file_name: None,
            action: None,
            analysis: None,
            document_summary: None,
            error: None,
        };

        match state {
            PipelineState::Initial => {}
            PipelineState::Processing(run) => {
                view.file_name = Some(run.file_name.clone());
                view.action = Some(run.action.as_str());
            }
            PipelineState::Ready(session) => {
                view.file_name = Some(session.file.name.clone());
                view.document_summary = Some(format_summary(&session.analysis));
                view.analysis = Some(session.analysis.clone());
            }
            PipelineState::Error(info) => {
                view.error = Some(ErrorView {
                    kind: info.kind.as_str(),
                    title: info.title.clone(),
                    message: info.message.clone(),
                });
            }
        }

        view
    }
}

pub async fn analysis_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(AnalysisView::from(&state.controller.state()))
}
