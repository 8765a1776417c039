use std::fmt;

use super::{DocumentAnalysis, DocumentFile};

/// The trigger that started a run. Drives error titles and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunAction {
    Analyze,
    Regenerate,
    Translate,
    Expand,
}

impl RunAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunAction::Analyze => "analyze",
            RunAction::Regenerate => "regenerate",
            RunAction::Translate => "translate",
            RunAction::Expand => "expand",
        }
    }
}

impl fmt::Display for RunAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunInfo {
    pub run_id: u64,
    pub action: RunAction,
    pub file_name: String,
}

/// The active file together with its latest analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub file: DocumentFile,
    pub analysis: DocumentAnalysis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Configuration,
    Attachment,
    Network,
    ExtractionTimeout,
    ExtractionFailed,
    EmptyResponse,
    MalformedResponse,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation_error",
            ErrorKind::Configuration => "configuration_error",
            ErrorKind::Attachment => "attachment_error",
            ErrorKind::Network => "network_error",
            ErrorKind::ExtractionTimeout => "extraction_timeout",
            ErrorKind::ExtractionFailed => "extraction_failed",
            ErrorKind::EmptyResponse => "empty_response",
            ErrorKind::MalformedResponse => "malformed_response",
        }
    }
}

/// User-facing failure of the last run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PipelineState {
    #[default]
    Initial,
    Processing(RunInfo),
    Ready(Session),
    Error(ErrorInfo),
}

impl PipelineState {
    pub fn name(&self) -> &'static str {
        match self {
            PipelineState::Initial => "initial",
            PipelineState::Processing(_) => "processing",
            PipelineState::Ready(_) => "ready",
            PipelineState::Error(_) => "error",
        }
    }

    pub fn is_processing(&self) -> bool {
        matches!(self, PipelineState::Processing(_))
    }

    pub fn is_run(&self, run_id: u64) -> bool {
        matches!(self, PipelineState::Processing(info) if info.run_id == run_id)
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            PipelineState::Ready(session) => Some(session),
            _ => None,
        }
    }
}
