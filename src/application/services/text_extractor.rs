use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::application::ports::{ExtractionCredentials, ExtractionService};
use crate::domain::{AnalyzerConfig, DocumentFile, ExtractedContent, ExtractionJob, ExtractionStatus};

use super::PipelineError;
use super::cancellation::cancellable;

pub const POLL_INTERVAL: Duration = Duration::from_secs(2);
pub const MAX_POLL_ATTEMPTS: u32 = 30;
pub const PDF_PLACEHOLDER_NOTE: &str =
    "Note: Configure a text extraction endpoint for automatic text extraction from PDFs.";

/// Chooses an extraction strategy and drives the submit/poll job protocol.
pub struct TextExtractor {
    service: Arc<dyn ExtractionService>,
}

impl TextExtractor {
    pub fn new(service: Arc<dyn ExtractionService>) -> Self {
        Self { service }
    }

    #[tracing::instrument(skip_all, fields(filename = %file.name))]
    pub async fn extract(
        &self,
        file: &DocumentFile,
        config: &AnalyzerConfig,
        cancel: &CancellationToken,
    ) -> Result<ExtractedContent, PipelineError> {
        if !config.has_extraction_service() {
            let content = fallback_content(file);
            tracing::info!(
                mode = ?content.mode(),
                "Extraction service not configured, using fallback content"
            );
            return Ok(content);
        }

        let credentials = ExtractionCredentials {
            endpoint: config.extraction_endpoint.clone(),
            api_key: config.extraction_key.clone(),
        };

        let handle = cancellable(cancel, async {
            self.service
                .submit(&credentials, file.content.clone(), file.effective_mime())
                .await
                .map_err(PipelineError::from_extraction)
        })
        .await?;

        tracing::debug!("Extraction job submitted");

        let text = self
            .poll_until_complete(&credentials, ExtractionJob::new(handle), cancel)
            .await?;

        tracing::info!(chars = text.len(), "Text extraction completed");
        Ok(ExtractedContent::Text(text))
    }

    async fn poll_until_complete(
        &self,
        credentials: &ExtractionCredentials,
        mut job: ExtractionJob,
        cancel: &CancellationToken,
    ) -> Result<String, PipelineError> {
        while job.attempts < MAX_POLL_ATTEMPTS {
            cancellable(cancel, async {
                tokio::time::sleep(POLL_INTERVAL).await;
                Ok::<(), PipelineError>(())
            })
            .await?;

            let poll = cancellable(cancel, async {
                self.service
                    .poll(credentials, &job.handle)
                    .await
                    .map_err(PipelineError::from_extraction)
            })
            .await?;

            job.record_poll(poll.status);
            tracing::debug!(attempt = job.attempts, status = %job.status, "Extraction job polled");

            match poll.status {
                ExtractionStatus::Succeeded => return Ok(poll.content.unwrap_or_default()),
                ExtractionStatus::Failed => {
                    return Err(PipelineError::ExtractionFailed(
                        "extraction service reported the analysis failed".to_string(),
                    ));
                }
                ExtractionStatus::Running | ExtractionStatus::NotStarted => {}
            }
        }

        tracing::warn!(attempts = job.attempts, "Extraction job did not finish in time");
        Err(PipelineError::ExtractionTimeout {
            attempts: job.attempts,
        })
    }
}

/// Content used when no extraction service is configured.
///
/// PDFs get a placeholder naming the file; every other accepted type is analyzed visually.
pub fn fallback_content(file: &DocumentFile) -> ExtractedContent {
    if file.is_pdf() {
        ExtractedContent::Text(format!(
            "[PDF Document: {}]\n{}",
            file.name, PDF_PLACEHOLDER_NOTE
        ))
    } else {
        ExtractedContent::Visual
    }
}
