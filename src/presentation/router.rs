use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    analysis_handler, cancel_handler, expand_handler, health_handler, regenerate_handler,
    reset_handler, translate_handler, upload_document_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState, body_limit_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/analysis", get(analysis_handler))
        .route("/api/v1/documents", post(upload_document_handler))
        .route("/api/v1/analysis/regenerate", post(regenerate_handler))
        .route("/api/v1/analysis/translate", post(translate_handler))
        .route("/api/v1/analysis/expand", post(expand_handler))
        .route("/api/v1/analysis/reset", post(reset_handler))
        .route("/api/v1/analysis/cancel", post(cancel_handler))
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state.with_upload_limit(body_limit_bytes))
}
