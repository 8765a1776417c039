use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose};
use tokio_util::sync::CancellationToken;

use crate::application::ports::{
    AttachmentRecorder, ExtractionService, LlmClient, LlmCredentials, NewAttachment,
};
use crate::domain::{
    AnalyzerConfig, ChatRequest, DocumentAnalysis, DocumentFile, ExtractedContent, OwnerReference,
    Session,
};

use super::analysis_client::{AnalysisClient, llm_credentials};
use super::cancellation::cancellable;
use super::request_builder::{
    build_analysis_request, build_expansion_request, build_translation_request,
};
use super::{PipelineError, TextExtractor};

/// A validated file plus the host record it belongs to.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub file: DocumentFile,
    pub owner: Option<OwnerReference>,
}

/// The sequential stages of a run. Each operation takes and returns a `Session`.
pub struct AnalysisPipeline {
    attachments: Arc<dyn AttachmentRecorder>,
    extractor: TextExtractor,
    analysis_client: AnalysisClient,
}

impl AnalysisPipeline {
    pub fn new(
        attachments: Arc<dyn AttachmentRecorder>,
        extraction_service: Arc<dyn ExtractionService>,
        llm_client: Arc<dyn LlmClient>,
    ) -> Self {
        Self {
            attachments,
            extractor: TextExtractor::new(extraction_service),
            analysis_client: AnalysisClient::new(llm_client),
        }
    }

    /// Persists the attachment, extracts, analyzes. Expects a file that passed validation.
    #[tracing::instrument(skip_all, fields(filename = %document.file.name))]
    pub async fn analyze_document(
        &self,
        document: NewDocument,
        config: &AnalyzerConfig,
        cancel: &CancellationToken,
    ) -> Result<Session, PipelineError> {
        let credentials = llm_credentials(config)?;
        let NewDocument { file, owner } = document;

        let attachment = new_attachment(&file, owner);
        let attachment_id = cancellable(cancel, async {
            self.attachments
                .create_attachment(&attachment)
                .await
                .map_err(PipelineError::from)
        })
        .await?;
        tracing::info!(attachment_id = %attachment_id, "Attachment created");

        let extracted = self.extractor.extract(&file, config, cancel).await?;
        let request = build_analysis_request(&extracted, &file);
        let analysis = self.complete(&request, &credentials, cancel).await?;

        Ok(Session {
            file,
            analysis: analysis.with_extracted(Some(extracted)),
        })
    }

    #[tracing::instrument(skip_all, fields(filename = %session.file.name))]
    pub async fn regenerate(
        &self,
        session: Session,
        config: &AnalyzerConfig,
        cancel: &CancellationToken,
    ) -> Result<Session, PipelineError> {
        let credentials = llm_credentials(config)?;
        let extracted = self.cached_or_extract(&session, config, cancel).await?;
        let request = build_analysis_request(&extracted, &session.file);
        let analysis = self.complete(&request, &credentials, cancel).await?;

        Ok(Session {
            file: session.file,
            analysis: analysis.with_extracted(Some(extracted)),
        })
    }

    #[tracing::instrument(skip_all, fields(filename = %session.file.name, language = %language))]
    pub async fn translate(
        &self,
        session: Session,
        language: &str,
        config: &AnalyzerConfig,
        cancel: &CancellationToken,
    ) -> Result<Session, PipelineError> {
        let language = language.trim();
        if language.is_empty() {
            return Err(PipelineError::Validation(
                "A target language is required for translation".to_string(),
            ));
        }

        let credentials = llm_credentials(config)?;
        let request = build_translation_request(&session.analysis, language);
        let translated = self.complete(&request, &credentials, cancel).await?;
        let cached = session.analysis.extracted;

        Ok(Session {
            file: session.file,
            analysis: translated.with_extracted(cached),
        })
    }

    #[tracing::instrument(skip_all, fields(filename = %session.file.name))]
    pub async fn expand(
        &self,
        session: Session,
        config: &AnalyzerConfig,
        cancel: &CancellationToken,
    ) -> Result<Session, PipelineError> {
        let credentials = llm_credentials(config)?;
        let extracted = self.cached_or_extract(&session, config, cancel).await?;
        let request = build_expansion_request(&session.analysis, &extracted, &session.file);
        let expanded = self.complete(&request, &credentials, cancel).await?;

        Ok(Session {
            file: session.file,
            analysis: expanded.with_extracted(Some(extracted)),
        })
    }

    async fn cached_or_extract(
        &self,
        session: &Session,
        config: &AnalyzerConfig,
        cancel: &CancellationToken,
    ) -> Result<ExtractedContent, PipelineError> {
        match &session.analysis.extracted {
            Some(cached) => {
                tracing::debug!("Reusing cached extraction");
                Ok(cached.clone())
            }
            None => self.extractor.extract(&session.file, config, cancel).await,
        }
    }

    async fn complete(
        &self,
        request: &ChatRequest,
        credentials: &LlmCredentials,
        cancel: &CancellationToken,
    ) -> Result<DocumentAnalysis, PipelineError> {
        cancellable(cancel, self.analysis_client.analyze(request, credentials)).await
    }
}

fn new_attachment(file: &DocumentFile, owner: Option<OwnerReference>) -> NewAttachment {
    NewAttachment {
        subject: format!("Document Analysis: {}", file.name),
        note_text: format!(
            "Document uploaded for AI analysis on {}",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        ),
        filename: file.name.clone(),
        mime_type: file.mime_type.clone(),
        base64_content: general_purpose::STANDARD.encode(&file.content),
        owner,
    }
}
