use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use docanalyzer::application::ports::{
    ExtractionCredentials, ExtractionService, ExtractionServiceError,
};
use docanalyzer::domain::ExtractionStatus;
use docanalyzer::infrastructure::http::RetryPolicy;
use docanalyzer::infrastructure::text_processing::{
    API_VERSION, AzureDocIntelAdapter, READ_MODEL_PATH,
};

use crate::support::{fast_retry, start_mock_server};

#[derive(Clone, Default)]
struct Recorded {
    submits: Arc<AtomicUsize>,
    polls: Arc<AtomicUsize>,
    failures_before_accept: usize,
    returns_location: bool,
    poll_status: u16,
    poll_body: &'static str,
}

async fn analyze(
    State(state): State<Recorded>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let attempt = state.submits.fetch_add(1, Ordering::SeqCst);
    assert_eq!(query.get("api-version").map(String::as_str), Some(API_VERSION));
    assert_eq!(headers["ocp-apim-subscription-key"], "secret-key");
    assert_eq!(headers["content-type"], "application/pdf");
    assert_eq!(&body[..], b"%PDF fake");

    if attempt < state.failures_before_accept {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }

    if !state.returns_location {
        return StatusCode::ACCEPTED.into_response();
    }

    let host = headers["host"].to_str().unwrap().to_string();
    let location = format!("http://{host}/operations/1");
    (StatusCode::ACCEPTED, [("Operation-Location", location)]).into_response()
}

async fn operation(State(state): State<Recorded>, headers: HeaderMap) -> Response {
    state.polls.fetch_add(1, Ordering::SeqCst);
    assert_eq!(headers["ocp-apim-subscription-key"], "secret-key");
    (
        StatusCode::from_u16(state.poll_status).unwrap(),
        [("content-type", "application/json")],
        state.poll_body,
    )
        .into_response()
}

async fn start(recorded: Recorded) -> (String, Recorded, tokio::sync::oneshot::Sender<()>) {
    let app = Router::new()
        .route(READ_MODEL_PATH, post(analyze))
        .route("/operations/1", get(operation))
        .with_state(recorded.clone());
    let (base_url, shutdown) = start_mock_server(app).await;
    (base_url, recorded, shutdown)
}

fn credentials(endpoint: &str) -> ExtractionCredentials {
    ExtractionCredentials {
        endpoint: format!("{endpoint}/"),
        api_key: "secret-key".into(),
    }
}

fn recorded(poll_status: u16, poll_body: &'static str) -> Recorded {
    Recorded {
        returns_location: true,
        poll_status,
        poll_body,
        ..Recorded::default()
    }
}

#[tokio::test]
async fn given_accepted_job_when_submitting_then_returns_operation_location() {
    let (base_url, state, shutdown) = start(recorded(200, "{}")).await;
    let adapter = AzureDocIntelAdapter::new(RetryPolicy::none());

    let result = adapter
        .submit(&credentials(&base_url), Bytes::from_static(b"%PDF fake"), "application/pdf")
        .await;

    let handle = result.unwrap();
    assert_eq!(handle, format!("{base_url}/operations/1"));
    assert_eq!(state.submits.load(Ordering::SeqCst), 1);
    let _ = shutdown.send(());
}

#[tokio::test]
async fn given_succeeded_operation_when_polling_then_returns_content() {
    let body = r#"{"status":"succeeded","analyzeResult":{"content":"Invoice 42"}}"#;
    let (base_url, _state, shutdown) = start(recorded(200, body)).await;
    let adapter = AzureDocIntelAdapter::new(RetryPolicy::none());

    let poll = adapter
        .poll(&credentials(&base_url), &format!("{base_url}/operations/1"))
        .await
        .unwrap();

    assert_eq!(poll.status, ExtractionStatus::Succeeded);
    assert_eq!(poll.content.as_deref(), Some("Invoice 42"));
    let _ = shutdown.send(());
}

#[tokio::test]
async fn given_running_operation_when_polling_then_running_without_content() {
    let (base_url, _state, shutdown) = start(recorded(200, r#"{"status":"running"}"#)).await;
    let adapter = AzureDocIntelAdapter::new(RetryPolicy::none());

    let poll = adapter
        .poll(&credentials(&base_url), &format!("{base_url}/operations/1"))
        .await
        .unwrap();

    assert_eq!(poll.status, ExtractionStatus::Running);
    assert_eq!(poll.content, None);
    let _ = shutdown.send(());
}

#[tokio::test]
async fn given_transient_failures_when_submitting_then_retried_until_accepted() {
    let state = Recorded {
        failures_before_accept: 2,
        ..recorded(200, "{}")
    };
    let (base_url, state, shutdown) = start(state).await;
    let adapter = AzureDocIntelAdapter::new(fast_retry());

    let result = adapter
        .submit(&credentials(&base_url), Bytes::from_static(b"%PDF fake"), "application/pdf")
        .await;

    assert!(result.is_ok(), "expected Ok but got: {:?}", result);
    assert_eq!(state.submits.load(Ordering::SeqCst), 3);
    let _ = shutdown.send(());
}

#[tokio::test]
async fn given_no_operation_location_when_submitting_then_missing_operation_location() {
    let state = Recorded {
        returns_location: false,
        ..recorded(200, "{}")
    };
    let (base_url, _state, shutdown) = start(state).await;
    let adapter = AzureDocIntelAdapter::new(RetryPolicy::none());

    let result = adapter
        .submit(&credentials(&base_url), Bytes::from_static(b"%PDF fake"), "application/pdf")
        .await;

    assert!(matches!(result, Err(ExtractionServiceError::MissingOperationLocation)));
    let _ = shutdown.send(());
}

#[tokio::test]
async fn given_server_error_when_polling_then_status_error_without_retry() {
    let (base_url, state, shutdown) = start(recorded(500, "boom")).await;
    let adapter = AzureDocIntelAdapter::new(fast_retry());

    let result = adapter
        .poll(&credentials(&base_url), &format!("{base_url}/operations/1"))
        .await;

    assert!(matches!(result, Err(ExtractionServiceError::Status { status: 500, .. })));
    assert_eq!(state.polls.load(Ordering::SeqCst), 1);
    let _ = shutdown.send(());
}

#[tokio::test]
async fn given_unreadable_poll_body_when_polling_then_invalid_response() {
    let (base_url, _state, shutdown) = start(recorded(200, "not json")).await;
    let adapter = AzureDocIntelAdapter::new(RetryPolicy::none());

    let result = adapter
        .poll(&credentials(&base_url), &format!("{base_url}/operations/1"))
        .await;

    assert!(matches!(result, Err(ExtractionServiceError::InvalidResponse(_))));
    let _ = shutdown.send(());
}
