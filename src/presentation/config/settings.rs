use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::domain::{
    AnalyzerConfig, DEFAULT_ACCEPTED_FILE_TYPES, DEFAULT_DEPLOYMENT, DEFAULT_MAX_FILE_SIZE_MB,
    parse_accepted_types,
};
use crate::infrastructure::http::{
    DEFAULT_INITIAL_BACKOFF, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_BACKOFF, RetryPolicy,
};
use crate::infrastructure::observability::{DEFAULT_LOG_FILTER, TracingConfig};

use super::Environment;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub extraction: ExtractionSettings,
    pub upload: UploadSettings,
    pub attachments: AttachmentSettings,
    pub retry: RetrySettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            deployment: DEFAULT_DEPLOYMENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    pub endpoint: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    pub max_file_size_mb: f64,
    /// Comma-separated extension list, e.g. `.pdf,.png`.
    pub accepted_file_types: String,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
            accepted_file_types: DEFAULT_ACCEPTED_FILE_TYPES.to_string(),
        }
    }
}

impl UploadSettings {
    /// Request body limit: twice the largest accepted file, so oversized files
    /// still reach validation and get a proper rejection.
    pub fn body_limit_bytes(&self) -> usize {
        (self.max_file_size_mb.max(0.0) * 2.0 * 1024.0 * 1024.0) as usize
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentProviderSetting {
    #[default]
    #[serde(alias = "in_memory", alias = "memory")]
    InMemory,
    Dataverse,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AttachmentSettings {
    pub provider: AttachmentProviderSetting,
    pub dataverse_url: Option<String>,
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_backoff_ms: DEFAULT_INITIAL_BACKOFF.as_millis() as u64,
            max_backoff_ms: DEFAULT_MAX_BACKOFF.as_millis() as u64,
        }
    }
}

impl RetrySettings {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_FILTER.to_string(),
            enable_json: false,
        }
    }
}

impl Settings {
    /// Loads `.env`, then `appsettings.<environment>` (optional), then `APP__*` variables.
    ///
    /// `APP__LLM__API_KEY` maps to `llm.api_key`.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            llm_endpoint: self.llm.endpoint.trim().to_string(),
            llm_api_key: self.llm.api_key.trim().to_string(),
            deployment_name: if self.llm.deployment.trim().is_empty() {
                DEFAULT_DEPLOYMENT.to_string()
            } else {
                self.llm.deployment.trim().to_string()
            },
            extraction_endpoint: self.extraction.endpoint.trim().to_string(),
            extraction_key: self.extraction.api_key.trim().to_string(),
            max_file_size_mb: self.upload.max_file_size_mb,
            accepted_file_types: parse_accepted_types(&self.upload.accepted_file_types),
        }
    }

    pub fn tracing_config(&self, environment: Environment) -> TracingConfig {
        TracingConfig {
            environment: environment.to_string(),
            json_format: self.logging.enable_json,
            default_filter: self.logging.level.clone(),
        }
    }
}
