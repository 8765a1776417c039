pub const DEFAULT_DEPLOYMENT: &str = "gpt-4o";
pub const DEFAULT_MAX_FILE_SIZE_MB: f64 = 10.0;
pub const DEFAULT_ACCEPTED_FILE_TYPES: &str = ".pdf,.png,.jpg,.jpeg";

/// Configuration consumed read-only by a single pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    pub llm_endpoint: String,
    pub llm_api_key: String,
    pub deployment_name: String,
    pub extraction_endpoint: String,
    pub extraction_key: String,
    pub max_file_size_mb: f64,
    pub accepted_file_types: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            llm_endpoint: String::new(),
            llm_api_key: String::new(),
            deployment_name: DEFAULT_DEPLOYMENT.to_string(),
            extraction_endpoint: String::new(),
            extraction_key: String::new(),
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
            accepted_file_types: parse_accepted_types(DEFAULT_ACCEPTED_FILE_TYPES),
        }
    }
}

impl AnalyzerConfig {
    pub fn has_extraction_service(&self) -> bool {
        !self.extraction_endpoint.trim().is_empty() && !self.extraction_key.trim().is_empty()
    }

    pub fn has_language_model(&self) -> bool {
        !self.llm_endpoint.trim().is_empty() && !self.llm_api_key.trim().is_empty()
    }
}

/// Parses a comma-separated extension list such as `.pdf, PNG,.jpg`.
pub fn parse_accepted_types(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .map(|t| if t.starts_with('.') { t } else { format!(".{t}") })
        .collect()
}
