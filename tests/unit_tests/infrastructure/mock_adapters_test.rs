use bytes::Bytes;
use docanalyzer::application::ports::{
    AttachmentError, AttachmentRecorder, ExtractionCredentials, ExtractionService, LlmClient,
    LlmClientError, LlmCredentials, NewAttachment,
};
use docanalyzer::domain::{ChatMessage, ChatRequest, ExtractionStatus};
use docanalyzer::infrastructure::attachments::MockAttachmentRecorder;
use docanalyzer::infrastructure::llm::MockLlmClient;
use docanalyzer::infrastructure::text_processing::MockExtractionService;

use crate::support::owner;

fn attachment() -> NewAttachment {
    NewAttachment {
        subject: "Document Analysis: a.pdf".into(),
        note_text: "note".into(),
        filename: "a.pdf".into(),
        mime_type: "application/pdf".into(),
        base64_content: "AA==".into(),
        owner: owner(),
    }
}

fn llm_credentials() -> LlmCredentials {
    LlmCredentials {
        endpoint: "https://llm".into(),
        api_key: "k".into(),
        deployment: "gpt-4o".into(),
    }
}

fn chat() -> ChatRequest {
    ChatRequest {
        messages: vec![ChatMessage::user("hi")],
        temperature: 0.7,
        max_tokens: 10,
    }
}

#[tokio::test]
async fn given_mock_recorder_when_creating_then_ids_are_sequential() {
    let recorder = MockAttachmentRecorder::new();

    let first = recorder.create_attachment(&attachment()).await.unwrap();
    let second = recorder.create_attachment(&attachment()).await.unwrap();

    assert_eq!(first.as_str(), "mock-annotation-1");
    assert_eq!(second.as_str(), "mock-annotation-2");
    assert_eq!(recorder.created().len(), 2);
}

#[tokio::test]
async fn given_failing_recorder_when_creating_then_status_error() {
    let recorder = MockAttachmentRecorder::failing(403);

    let result = recorder.create_attachment(&attachment()).await;

    assert!(matches!(result, Err(AttachmentError::Status { status: 403, .. })));
    assert!(recorder.created().is_empty());
}

#[tokio::test]
async fn given_scripted_llm_when_completing_then_replies_in_order_and_requests_recorded() {
    let llm = MockLlmClient::replying(&["one"]);
    llm.push_result(Err(LlmClientError::Transport("down".into())));

    let first = llm.complete(&llm_credentials(), &chat()).await.unwrap();
    let second = llm.complete(&llm_credentials(), &chat()).await;
    let third = llm.complete(&llm_credentials(), &chat()).await.unwrap();

    assert_eq!(first.as_deref(), Some("one"));
    assert!(matches!(second, Err(LlmClientError::Transport(_))));
    assert_eq!(third, None);
    assert_eq!(llm.requests().len(), 3);
}

#[tokio::test]
async fn given_exhausted_poll_script_when_polling_then_running() {
    let service = MockExtractionService::new();
    service.push_status(ExtractionStatus::NotStarted);
    let credentials = ExtractionCredentials {
        endpoint: "https://x".into(),
        api_key: "k".into(),
    };

    let handle = service
        .submit(&credentials, Bytes::from_static(b"data"), "application/pdf")
        .await
        .unwrap();
    let first = service.poll(&credentials, &handle).await.unwrap();
    let second = service.poll(&credentials, &handle).await.unwrap();

    assert_eq!(first.status, ExtractionStatus::NotStarted);
    assert_eq!(second.status, ExtractionStatus::Running);
    assert_eq!(service.submit_calls(), 1);
    assert_eq!(service.poll_calls(), 2);
}
