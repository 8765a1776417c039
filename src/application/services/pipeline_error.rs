use crate::application::ports::{AttachmentError, ExtractionServiceError, LlmClientError};
use crate::domain::{ErrorInfo, ErrorKind, RunAction};

const GENERIC_FAILURE: &str = "An unknown error occurred";

/// Failure of any pipeline stage. Every variant aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Configuration(String),
    #[error("Failed to create attachment: {0}")]
    Attachment(#[from] AttachmentError),
    #[error("{context}: {message}")]
    Network { context: String, message: String },
    #[error("Text extraction failed: analysis timed out after {attempts} status checks")]
    ExtractionTimeout { attempts: u32 },
    #[error("Text extraction failed: {0}")]
    ExtractionFailed(String),
    #[error("Document analysis failed: no response from the language model")]
    EmptyResponse,
    #[error("Document analysis failed: malformed response: {0}")]
    MalformedResponse(String),
    #[error("run cancelled")]
    Cancelled,
}

impl PipelineError {
    pub fn kind(&self) -> Option<ErrorKind> {
        let kind = match self {
            PipelineError::Validation(_) => ErrorKind::Validation,
            PipelineError::Configuration(_) => ErrorKind::Configuration,
            PipelineError::Attachment(_) => ErrorKind::Attachment,
            PipelineError::Network { .. } => ErrorKind::Network,
            PipelineError::ExtractionTimeout { .. } => ErrorKind::ExtractionTimeout,
            PipelineError::ExtractionFailed(_) => ErrorKind::ExtractionFailed,
            PipelineError::EmptyResponse => ErrorKind::EmptyResponse,
            PipelineError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            PipelineError::Cancelled => return None,
        };
        Some(kind)
    }

    pub(crate) fn from_extraction(err: ExtractionServiceError) -> Self {
        match err {
            ExtractionServiceError::Status { status, body } => PipelineError::Network {
                context: "Text extraction failed".to_string(),
                message: format!("extraction service returned {status}: {body}"),
            },
            ExtractionServiceError::Transport(message) => PipelineError::Network {
                context: "Text extraction failed".to_string(),
                message,
            },
            other => PipelineError::ExtractionFailed(other.to_string()),
        }
    }

    pub(crate) fn from_llm(err: LlmClientError) -> Self {
        match err {
            LlmClientError::InvalidResponse(message) => PipelineError::MalformedResponse(message),
            other => PipelineError::Network {
                context: "Document analysis failed".to_string(),
                message: other.to_string(),
            },
        }
    }
}

/// Title shown for a failed run, by the action that started it.
pub fn error_title(action: RunAction, kind: ErrorKind) -> &'static str {
    if kind == ErrorKind::Validation {
        return "Invalid File";
    }
    match action {
        RunAction::Analyze => "Processing Error",
        RunAction::Regenerate => "Regeneration Error",
        RunAction::Translate => "Translation Error",
        RunAction::Expand => "Expansion Error",
    }
}

impl ErrorInfo {
    /// Maps a stage failure to the (title, message) pair shown to the user.
    ///
    /// Cancellation is not a failure and maps to `None`.
    pub fn from_failure(action: RunAction, err: &PipelineError) -> Option<Self> {
        let kind = err.kind()?;
        let message = err.to_string();
        let message = if message.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            message
        };
        Some(Self {
            kind,
            title: error_title(action, kind).to_string(),
            message,
        })
    }
}
