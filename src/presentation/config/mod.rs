mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AttachmentProviderSetting, AttachmentSettings, ExtractionSettings, LlmSettings,
    LoggingSettings, RetrySettings, ServerSettings, Settings, UploadSettings,
};
