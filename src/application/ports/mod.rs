mod attachment_recorder;
mod extraction_service;
mod llm_client;

pub use attachment_recorder::{AttachmentError, AttachmentRecorder, NewAttachment};
pub use extraction_service::{
    ExtractionCredentials, ExtractionPoll, ExtractionService, ExtractionServiceError,
};
pub use llm_client::{LlmClient, LlmClientError, LlmCredentials};
