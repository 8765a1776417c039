use std::sync::Arc;

use crate::application::ports::{LlmClient, LlmCredentials};
use crate::domain::{AnalyzerConfig, ChatRequest, DocumentAnalysis};

use super::PipelineError;
use super::response_decoder::decode_analysis;

/// Sends a chat request and normalizes the reply into a `DocumentAnalysis`.
pub struct AnalysisClient {
    llm_client: Arc<dyn LlmClient>,
}

impl AnalysisClient {
    pub fn new(llm_client: Arc<dyn LlmClient>) -> Self {
        Self { llm_client }
    }

    #[tracing::instrument(
        skip_all,
        fields(temperature = request.temperature, max_tokens = request.max_tokens)
    )]
    pub async fn analyze(
        &self,
        request: &ChatRequest,
        credentials: &LlmCredentials,
    ) -> Result<DocumentAnalysis, PipelineError> {
        let content = self
            .llm_client
            .complete(credentials, request)
            .await
            .map_err(PipelineError::from_llm)?
            .filter(|c| !c.trim().is_empty())
            .ok_or(PipelineError::EmptyResponse)?;

        let analysis = decode_analysis(&content)?;

        tracing::info!(
            key_points = analysis.key_points.len(),
            risks = analysis.risks.len(),
            next_actions = analysis.next_actions.len(),
            "Analysis response normalized"
        );

        Ok(analysis)
    }
}

/// Language-model credentials, or a configuration error when endpoint or key is missing.
pub fn llm_credentials(config: &AnalyzerConfig) -> Result<LlmCredentials, PipelineError> {
    if !config.has_language_model() {
        return Err(PipelineError::Configuration(
            "Language model endpoint and API key must be configured".to_string(),
        ));
    }

    Ok(LlmCredentials {
        endpoint: config.llm_endpoint.clone(),
        api_key: config.llm_api_key.clone(),
        deployment: config.deployment_name.clone(),
    })
}
