use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::ExtractionStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionCredentials {
    pub endpoint: String,
    pub api_key: String,
}

/// One observation of an extraction job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionPoll {
    pub status: ExtractionStatus,
    pub content: Option<String>,
}

/// Asynchronous submit-then-poll text extraction.
#[async_trait]
pub trait ExtractionService: Send + Sync {
    /// Enqueues a job and returns its operation handle.
    async fn submit(
        &self,
        credentials: &ExtractionCredentials,
        data: Bytes,
        mime_type: &str,
    ) -> Result<String, ExtractionServiceError>;

    async fn poll(
        &self,
        credentials: &ExtractionCredentials,
        operation_handle: &str,
    ) -> Result<ExtractionPoll, ExtractionServiceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionServiceError {
    #[error("extraction service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("extraction request failed: {0}")]
    Transport(String),
    #[error("No operation location returned from extraction service")]
    MissingOperationLocation,
    #[error("unreadable extraction response: {0}")]
    InvalidResponse(String),
}
