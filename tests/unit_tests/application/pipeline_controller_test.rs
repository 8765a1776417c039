use std::time::Duration;

use docanalyzer::application::services::TriggerError;
use docanalyzer::domain::{AnalyzerConfig, ErrorKind, PipelineState, RunAction};

use crate::support::{
    ANALYSIS_JSON, Harness, SECOND_ANALYSIS_JSON, file, llm_only_config, new_document, pdf_file,
};

#[tokio::test]
async fn given_rejected_file_when_submitting_then_error_state_with_invalid_file_title() {
    let harness = Harness::replying(&[ANALYSIS_JSON]);
    let controller = harness.controller();

    let result = controller.submit_file(
        new_document(file("notes.txt", "text/plain", b"hello")),
        llm_only_config(),
    );

    assert!(matches!(result, Err(TriggerError::InvalidFile(_))));
    let PipelineState::Error(info) = controller.state() else {
        panic!("expected error state");
    };
    assert_eq!(info.kind, ErrorKind::Validation);
    assert_eq!(info.title, "Invalid File");
    assert!(info.message.starts_with("File type .txt is not accepted"));
    assert!(harness.attachments.created().is_empty());
}

#[tokio::test]
async fn given_valid_file_when_run_completes_then_ready_with_summary() {
    let harness = Harness::replying(&[ANALYSIS_JSON]);
    let controller = harness.controller();

    let run = controller
        .submit_file(new_document(pdf_file()), llm_only_config())
        .unwrap();
    assert_eq!(run.action(), RunAction::Analyze);
    assert!(controller.state().is_processing());
    assert_eq!(controller.document_summary(), None);

    let state = run.execute().await;

    assert_eq!(state.name(), "ready");
    let summary = controller.document_summary().unwrap();
    assert!(summary.starts_with("EXECUTIVE SUMMARY:\nSupply agreement"));
    assert!(summary.contains("1. [HIGH] No liability cap"));
}

#[tokio::test]
async fn given_run_in_flight_when_triggering_anything_then_busy() {
    let harness = Harness::replying(&[ANALYSIS_JSON]);
    let controller = harness.controller();

    let run = controller
        .submit_file(new_document(pdf_file()), llm_only_config())
        .unwrap();

    assert_eq!(
        controller
            .submit_file(new_document(pdf_file()), llm_only_config())
            .err(),
        Some(TriggerError::Busy)
    );
    assert_eq!(controller.regenerate(llm_only_config()).err(), Some(TriggerError::Busy));
    assert_eq!(
        controller.translate("German", llm_only_config()).err(),
        Some(TriggerError::Busy)
    );
    assert_eq!(controller.expand(llm_only_config()).err(), Some(TriggerError::Busy));
    assert_eq!(controller.reset(), Err(TriggerError::Busy));

    run.execute().await;
    assert_eq!(harness.llm.requests().len(), 1);
    assert_eq!(harness.attachments.created().len(), 1);
}

#[tokio::test]
async fn given_initial_state_when_transforming_then_invalid_state() {
    let controller = Harness::replying(&[]).controller();

    assert_eq!(
        controller.regenerate(llm_only_config()).err(),
        Some(TriggerError::InvalidState {
            action: "regenerate",
            state: "initial",
        })
    );
}

#[tokio::test]
async fn given_ready_state_when_regenerating_then_analysis_replaced() {
    let harness = Harness::replying(&[ANALYSIS_JSON, SECOND_ANALYSIS_JSON]);
    let controller = harness.controller();
    controller
        .submit_file(new_document(pdf_file()), llm_only_config())
        .unwrap()
        .execute()
        .await;

    let run = controller.regenerate(llm_only_config()).unwrap();
    assert_eq!(run.action(), RunAction::Regenerate);
    run.execute().await;

    let state = controller.state();
    let session = state.session().unwrap();
    assert_eq!(session.analysis.executive_summary, "Second pass.");
    assert_eq!(session.file.name, "contract.pdf");
}

#[tokio::test]
async fn given_ready_state_when_translating_blank_language_then_missing_language() {
    let harness = Harness::replying(&[ANALYSIS_JSON]);
    let controller = harness.controller();
    controller
        .submit_file(new_document(pdf_file()), llm_only_config())
        .unwrap()
        .execute()
        .await;

    assert_eq!(
        controller.translate(" ", llm_only_config()).err(),
        Some(TriggerError::MissingLanguage)
    );
    assert_eq!(controller.state().name(), "ready");
}

#[tokio::test]
async fn given_malformed_reply_when_expanding_then_expansion_error() {
    let harness = Harness::replying(&[ANALYSIS_JSON, "not json at all"]);
    let controller = harness.controller();
    controller
        .submit_file(new_document(pdf_file()), llm_only_config())
        .unwrap()
        .execute()
        .await;

    let state = controller.expand(llm_only_config()).unwrap().execute().await;

    let PipelineState::Error(info) = state else {
        panic!("expected error state");
    };
    assert_eq!(info.kind, ErrorKind::MalformedResponse);
    assert_eq!(info.title, "Expansion Error");
    assert_eq!(controller.document_summary(), None);
}

#[tokio::test]
async fn given_missing_configuration_when_run_executes_then_processing_error() {
    let harness = Harness::replying(&[ANALYSIS_JSON]);
    let controller = harness.controller();

    let state = controller
        .submit_file(new_document(pdf_file()), AnalyzerConfig::default())
        .unwrap()
        .execute()
        .await;

    let PipelineState::Error(info) = state else {
        panic!("expected error state");
    };
    assert_eq!(info.kind, ErrorKind::Configuration);
    assert_eq!(info.title, "Processing Error");
}

#[tokio::test]
async fn given_error_state_when_resetting_then_initial_and_new_file_accepted() {
    let harness = Harness::replying(&[ANALYSIS_JSON]);
    let controller = harness.controller();
    let _ = controller.submit_file(
        new_document(file("notes.txt", "text/plain", b"x")),
        llm_only_config(),
    );

    controller.reset().unwrap();

    assert_eq!(controller.state(), PipelineState::Initial);
    let state = controller
        .submit_file(new_document(pdf_file()), llm_only_config())
        .unwrap()
        .execute()
        .await;
    assert_eq!(state.name(), "ready");
}

#[tokio::test]
async fn given_run_in_flight_when_cancelled_then_initial_and_late_result_discarded() {
    let harness = Harness::replying(&[ANALYSIS_JSON]);
    let controller = harness.controller();
    let run = controller
        .submit_file(new_document(pdf_file()), llm_only_config())
        .unwrap();

    assert!(controller.cancel());
    assert_eq!(controller.state(), PipelineState::Initial);

    let state = run.execute().await;

    assert_eq!(state, PipelineState::Initial);
    assert!(harness.llm.requests().is_empty());
    assert!(!controller.cancel());
}

#[tokio::test]
async fn given_unexecuted_run_when_dropped_then_initial() {
    let controller = Harness::replying(&[ANALYSIS_JSON]).controller();
    let run = controller
        .submit_file(new_document(pdf_file()), llm_only_config())
        .unwrap();

    drop(run);

    assert_eq!(controller.state(), PipelineState::Initial);
}

#[tokio::test]
async fn given_subscriber_when_run_completes_then_change_is_signalled() {
    let harness = Harness::replying(&[ANALYSIS_JSON]);
    let controller = harness.controller();
    let mut updates = controller.subscribe();

    let run = controller
        .submit_file(new_document(pdf_file()), llm_only_config())
        .unwrap();
    assert!(updates.has_changed().unwrap());
    assert!(updates.borrow_and_update().is_processing());

    let handle = tokio::spawn(run.execute());
    tokio::time::timeout(Duration::from_secs(5), updates.changed())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updates.borrow().name(), "ready");
    handle.await.unwrap();
}

#[tokio::test]
async fn given_run_already_ready_when_cancelled_then_reports_false_and_keeps_ready() {
    let harness = Harness::replying(&[ANALYSIS_JSON]);
    let controller = harness.controller();
    let state = controller
        .submit_file(new_document(pdf_file()), llm_only_config())
        .unwrap()
        .execute()
        .await;
    assert_eq!(state.name(), "ready");

    assert!(!controller.cancel());
    assert_eq!(controller.state().name(), "ready");
}
