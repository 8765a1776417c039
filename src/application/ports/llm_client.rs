use async_trait::async_trait;

use crate::domain::ChatRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmCredentials {
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Returns the first choice's message content, `None` when the model produced nothing.
    async fn complete(
        &self,
        credentials: &LlmCredentials,
        request: &ChatRequest,
    ) -> Result<Option<String>, LlmClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("language model returned {status} - {body}")]
    Status { status: u16, body: String },
    #[error("language model request failed: {0}")]
    Transport(String),
    #[error("invalid completion envelope: {0}")]
    InvalidResponse(String),
}
