use docanalyzer::application::ports::AttachmentError;
use docanalyzer::application::services::{PipelineError, error_title};
use docanalyzer::domain::{ErrorInfo, ErrorKind, RunAction};

#[test]
fn given_each_action_when_titling_failure_then_title_follows_action() {
    let kind = ErrorKind::Network;
    assert_eq!(error_title(RunAction::Analyze, kind), "Processing Error");
    assert_eq!(error_title(RunAction::Regenerate, kind), "Regeneration Error");
    assert_eq!(error_title(RunAction::Translate, kind), "Translation Error");
    assert_eq!(error_title(RunAction::Expand, kind), "Expansion Error");
}

#[test]
fn given_validation_failure_when_titling_then_invalid_file() {
    assert_eq!(
        error_title(RunAction::Analyze, ErrorKind::Validation),
        "Invalid File"
    );
}

#[test]
fn given_missing_owner_when_mapping_then_message_carries_reason() {
    let err = PipelineError::from(AttachmentError::MissingOwner);
    let info = ErrorInfo::from_failure(RunAction::Analyze, &err).unwrap();

    assert_eq!(info.kind, ErrorKind::Attachment);
    assert_eq!(info.title, "Processing Error");
    assert_eq!(
        info.message,
        "Failed to create attachment: Cannot create note: No entity reference found"
    );
}

#[test]
fn given_timeout_when_mapping_then_message_names_text_extraction() {
    let err = PipelineError::ExtractionTimeout { attempts: 30 };
    let info = ErrorInfo::from_failure(RunAction::Regenerate, &err).unwrap();

    assert_eq!(info.kind, ErrorKind::ExtractionTimeout);
    assert_eq!(info.title, "Regeneration Error");
    assert!(info.message.starts_with("Text extraction failed"));
}

#[test]
fn given_blank_message_when_mapping_then_generic_text() {
    let err = PipelineError::ExtractionFailed(String::new());
    let info = ErrorInfo::from_failure(RunAction::Expand, &err).unwrap();
    assert_eq!(info.message, "Text extraction failed: ");

    let err = PipelineError::Configuration("  ".into());
    let info = ErrorInfo::from_failure(RunAction::Expand, &err).unwrap();
    assert_eq!(info.message, "An unknown error occurred");
}

#[test]
fn given_cancellation_when_mapping_then_not_an_error() {
    assert_eq!(
        ErrorInfo::from_failure(RunAction::Translate, &PipelineError::Cancelled),
        None
    );
}
