use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::application::ports::{AttachmentError, AttachmentRecorder, NewAttachment};
use crate::domain::AttachmentId;

/// In-memory recorder. Keeps every attachment it accepts and can be switched
/// into a failing mode.
#[derive(Default)]
pub struct MockAttachmentRecorder {
    created: Mutex<Vec<NewAttachment>>,
    fail_with_status: Mutex<Option<u16>>,
    next_id: AtomicU64,
}

impl MockAttachmentRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(status: u16) -> Self {
        let mock = Self::new();
        mock.fail_with(Some(status));
        mock
    }

    pub fn fail_with(&self, status: Option<u16>) {
        *self
            .fail_with_status
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = status;
    }

    pub fn created(&self) -> Vec<NewAttachment> {
        self.created
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl AttachmentRecorder for MockAttachmentRecorder {
    async fn create_attachment(
        &self,
        attachment: &NewAttachment,
    ) -> Result<AttachmentId, AttachmentError> {
        if attachment.owner.is_none() {
            return Err(AttachmentError::MissingOwner);
        }

        let failure = *self
            .fail_with_status
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(status) = failure {
            return Err(AttachmentError::Status {
                status,
                body: "mock failure".into(),
            });
        }

        self.created
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(attachment.clone());

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(AttachmentId(format!("mock-annotation-{id}")))
    }
}
