use async_trait::async_trait;

use crate::domain::{AttachmentId, OwnerReference};

/// Everything needed to store an uploaded document against a host record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAttachment {
    pub subject: String,
    pub note_text: String,
    pub filename: String,
    pub mime_type: String,
    pub base64_content: String,
    pub owner: Option<OwnerReference>,
}

#[async_trait]
pub trait AttachmentRecorder: Send + Sync {
    async fn create_attachment(
        &self,
        attachment: &NewAttachment,
    ) -> Result<AttachmentId, AttachmentError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    #[error("Cannot create note: No entity reference found")]
    MissingOwner,
    #[error("attachment store returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("attachment request failed: {0}")]
    Transport(String),
    #[error("attachment response missing record id")]
    MissingRecordId,
    #[error("attachment store not configured: {0}")]
    NotConfigured(String),
}
