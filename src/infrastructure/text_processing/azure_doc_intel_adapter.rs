use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{
    ExtractionCredentials, ExtractionPoll, ExtractionService, ExtractionServiceError,
};
use crate::domain::ExtractionStatus;
use crate::infrastructure::http::{RetryPolicy, build_http_client};

pub const API_VERSION: &str = "2023-07-31";
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
pub const OPERATION_LOCATION_HEADER: &str = "Operation-Location";
pub const READ_MODEL_PATH: &str = "/formrecognizer/documentModels/prebuilt-read:analyze";

/// Azure Document Intelligence (Form Recognizer) read model over HTTP.
pub struct AzureDocIntelAdapter {
    client: Client,
    retry: RetryPolicy,
}

impl AzureDocIntelAdapter {
    pub fn new(retry: RetryPolicy) -> Self {
        Self {
            client: build_http_client(),
            retry,
        }
    }

    pub fn analyze_url(endpoint: &str) -> String {
        format!(
            "{}{}?api-version={}",
            endpoint.trim_end_matches('/'),
            READ_MODEL_PATH,
            API_VERSION
        )
    }
}

#[async_trait]
impl ExtractionService for AzureDocIntelAdapter {
    #[tracing::instrument(skip(self, credentials, data), fields(bytes = data.len()))]
    async fn submit(
        &self,
        credentials: &ExtractionCredentials,
        data: Bytes,
        mime_type: &str,
    ) -> Result<String, ExtractionServiceError> {
        let url = Self::analyze_url(&credentials.endpoint);

        let response = self
            .retry
            .send("extraction_submit", || {
                self.client
                    .post(&url)
                    .header(SUBSCRIPTION_KEY_HEADER, &credentials.api_key)
                    .header(reqwest::header::CONTENT_TYPE, mime_type)
                    .body(data.clone())
            })
            .await
            .map_err(|e| ExtractionServiceError::Transport(format!("submit failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractionServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let operation_location = response
            .headers()
            .get(OPERATION_LOCATION_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.trim().is_empty())
            .ok_or(ExtractionServiceError::MissingOperationLocation)?
            .to_string();

        Ok(operation_location)
    }

    #[tracing::instrument(skip(self, credentials))]
    async fn poll(
        &self,
        credentials: &ExtractionCredentials,
        operation_handle: &str,
    ) -> Result<ExtractionPoll, ExtractionServiceError> {
        let response = self
            .client
            .get(operation_handle)
            .header(SUBSCRIPTION_KEY_HEADER, &credentials.api_key)
            .send()
            .await
            .map_err(|e| ExtractionServiceError::Transport(format!("poll failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractionServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let result: AnalyzeResponse = response
            .json()
            .await
            .map_err(|e| ExtractionServiceError::InvalidResponse(e.to_string()))?;

        Ok(result.into_poll())
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeResponse {
    pub status: String,
    #[serde(rename = "analyzeResult")]
    pub analyze_result: Option<AnalyzeResult>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeResult {
    #[serde(default)]
    pub content: String,
}

impl AnalyzeResponse {
    pub fn into_poll(self) -> ExtractionPoll {
        ExtractionPoll {
            status: ExtractionStatus::parse(&self.status),
            content: self.analyze_result.map(|r| r.content),
        }
    }
}
