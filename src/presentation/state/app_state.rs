use std::sync::Arc;

use crate::application::services::PipelineController;
use crate::domain::AnalyzerConfig;

#[derive(Clone)]
pub struct AppState {
    pub controller: PipelineController,
    pub analyzer_config: Arc<AnalyzerConfig>,
    /// Largest upload body the host will buffer.
    pub upload_limit_bytes: usize,
}

impl AppState {
    pub fn new(controller: PipelineController, analyzer_config: AnalyzerConfig) -> Self {
        Self {
            controller,
            analyzer_config: Arc::new(analyzer_config),
            upload_limit_bytes: usize::MAX,
        }
    }

    pub fn with_upload_limit(self, upload_limit_bytes: usize) -> Self {
        Self {
            upload_limit_bytes,
            ..self
        }
    }

    /// A fresh copy for one run; runs never share mutable configuration.
    pub fn run_config(&self) -> AnalyzerConfig {
        self.analyzer_config.as_ref().clone()
    }
}
