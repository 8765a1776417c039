use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};

use crate::application::ports::{AttachmentError, AttachmentRecorder, NewAttachment};
use crate::domain::AttachmentId;
use crate::infrastructure::http::{RetryPolicy, build_http_client};

pub const WEB_API_PATH: &str = "/api/data/v9.2/annotations";
pub const ENTITY_ID_HEADER: &str = "OData-EntityId";

/// Stores uploaded documents as annotation records through the Dataverse Web API.
pub struct DataverseAttachmentRecorder {
    client: Client,
    organization_url: String,
    access_token: String,
    retry: RetryPolicy,
}

impl DataverseAttachmentRecorder {
    pub fn new(organization_url: &str, access_token: &str, retry: RetryPolicy) -> Self {
        Self {
            client: build_http_client(),
            organization_url: organization_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
            retry,
        }
    }

    fn annotations_url(&self) -> String {
        format!("{}{}", self.organization_url, WEB_API_PATH)
    }
}

/// Builds the annotation payload. The owner binding uses the entity set name
/// derived by pluralizing the logical name.
pub fn annotation_body(attachment: &NewAttachment) -> Result<Value, AttachmentError> {
    let owner = attachment
        .owner
        .as_ref()
        .ok_or(AttachmentError::MissingOwner)?;

    let mut body = Map::new();
    body.insert("subject".into(), Value::from(attachment.subject.as_str()));
    body.insert("notetext".into(), Value::from(attachment.note_text.as_str()));
    body.insert("filename".into(), Value::from(attachment.filename.as_str()));
    body.insert("mimetype".into(), Value::from(attachment.mime_type.as_str()));
    body.insert(
        "documentbody".into(),
        Value::from(attachment.base64_content.as_str()),
    );
    body.insert(
        format!("objectid_{}@odata.bind", owner.entity_type),
        Value::from(format!("/{}s({})", owner.entity_type, owner.bare_id())),
    );

    Ok(Value::Object(body))
}

/// Pulls the record id out of an entity reference such as
/// `https://org/api/data/v9.2/annotations(00000000-0000-0000-0000-000000000001)`.
pub fn record_id_from_entity_ref(entity_ref: &str) -> Option<&str> {
    let start = entity_ref.rfind('(')? + 1;
    let end = start + entity_ref[start..].find(')')?;
    let id = &entity_ref[start..end];
    (!id.is_empty()).then_some(id)
}

#[async_trait]
impl AttachmentRecorder for DataverseAttachmentRecorder {
    #[tracing::instrument(
        skip(self, attachment),
        fields(filename = %attachment.filename, mime_type = %attachment.mime_type)
    )]
    async fn create_attachment(
        &self,
        attachment: &NewAttachment,
    ) -> Result<AttachmentId, AttachmentError> {
        let body = annotation_body(attachment)?;
        let url = self.annotations_url();

        let response = self
            .retry
            .send("create_annotation", || {
                self.client
                    .post(&url)
                    .bearer_auth(&self.access_token)
                    .header("OData-MaxVersion", "4.0")
                    .header("OData-Version", "4.0")
                    .header("Accept", "application/json")
                    .json(&body)
            })
            .await
            .map_err(|e| AttachmentError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AttachmentError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let id = response
            .headers()
            .get(ENTITY_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(record_id_from_entity_ref)
            .map(str::to_string)
            .ok_or(AttachmentError::MissingRecordId)?;

        tracing::info!(annotation_id = %id, "Attachment created");
        Ok(AttachmentId(id))
    }
}
