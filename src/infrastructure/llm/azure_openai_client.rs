use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{LlmClient, LlmClientError, LlmCredentials};
use crate::domain::{ChatMessage, ChatRequest};
use crate::infrastructure::http::{RetryPolicy, build_http_client};
use crate::infrastructure::observability::sanitize_prompt;

pub const API_VERSION: &str = "2024-02-15-preview";

/// Azure OpenAI chat completions in JSON-object mode.
pub struct AzureOpenAiClient {
    client: Client,
    retry: RetryPolicy,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl AzureOpenAiClient {
    pub fn new(retry: RetryPolicy) -> Self {
        Self {
            client: build_http_client(),
            retry,
        }
    }

    pub fn completions_url(credentials: &LlmCredentials) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            credentials.endpoint.trim_end_matches('/'),
            credentials.deployment,
            API_VERSION
        )
    }
}

#[async_trait]
impl LlmClient for AzureOpenAiClient {
    #[tracing::instrument(
        skip(self, credentials, request),
        fields(deployment = %credentials.deployment, messages = request.messages.len())
    )]
    async fn complete(
        &self,
        credentials: &LlmCredentials,
        request: &ChatRequest,
    ) -> Result<Option<String>, LlmClientError> {
        let url = Self::completions_url(credentials);
        let body = ChatCompletionRequest {
            messages: &request.messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let response = self
            .retry
            .send("chat_completion", || {
                self.client
                    .post(&url)
                    .header("api-key", &credentials.api_key)
                    .json(&body)
            })
            .await
            .map_err(|e| LlmClientError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let raw_bytes = response
            .bytes()
            .await
            .map_err(|e| LlmClientError::Transport(e.to_string()))?;

        let completion: ChatCompletionResponse =
            serde_json::from_slice(&raw_bytes).map_err(|e| {
                tracing::error!(
                    raw_response = %sanitize_prompt(&String::from_utf8_lossy(&raw_bytes)),
                    "Failed to parse chat completion envelope"
                );
                LlmClientError::InvalidResponse(e.to_string())
            })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content);

        if let Some(text) = &content {
            tracing::debug!(response = %sanitize_prompt(text), "Chat completion received");
        }

        Ok(content)
    }
}
