use std::sync::Arc;

use crate::application::ports::{AttachmentError, AttachmentRecorder};
use crate::infrastructure::http::RetryPolicy;
use crate::presentation::config::{AttachmentProviderSetting, AttachmentSettings};

use super::dataverse_attachment_recorder::DataverseAttachmentRecorder;
use super::mock_attachment_recorder::MockAttachmentRecorder;

pub struct AttachmentRecorderFactory;

impl AttachmentRecorderFactory {
    pub fn create(
        settings: &AttachmentSettings,
        retry: RetryPolicy,
    ) -> Result<Arc<dyn AttachmentRecorder>, AttachmentError> {
        match settings.provider {
            AttachmentProviderSetting::InMemory => Ok(Arc::new(MockAttachmentRecorder::new())),
            AttachmentProviderSetting::Dataverse => {
                let url = settings.dataverse_url.as_deref().ok_or_else(|| {
                    AttachmentError::NotConfigured("dataverse_url required".into())
                })?;
                let token = settings.access_token.as_deref().ok_or_else(|| {
                    AttachmentError::NotConfigured("access_token required".into())
                })?;
                Ok(Arc::new(DataverseAttachmentRecorder::new(url, token, retry)))
            }
        }
    }
}
