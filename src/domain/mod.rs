mod analyzer_config;
mod chat_request;
mod document_analysis;
mod document_file;
mod extracted_content;
mod extraction_job;
mod owner_reference;
mod pipeline_state;
mod risk;
mod summary;

pub use analyzer_config::{
    AnalyzerConfig, DEFAULT_ACCEPTED_FILE_TYPES, DEFAULT_DEPLOYMENT, DEFAULT_MAX_FILE_SIZE_MB,
    parse_accepted_types,
};
pub use chat_request::{ChatMessage, ChatRequest, ChatRole, ContentPart, ImageUrl, MessageContent};
pub use document_analysis::{DocumentAnalysis, NO_SUMMARY_PLACEHOLDER};
pub use document_file::DocumentFile;
pub use extracted_content::{AnalysisMode, ExtractedContent};
pub use extraction_job::{ExtractionJob, ExtractionStatus};
pub use owner_reference::{AttachmentId, OwnerReference};
pub use pipeline_state::{ErrorInfo, ErrorKind, PipelineState, RunAction, RunInfo, Session};
pub use risk::{Risk, RiskLevel};
pub use summary::format_summary;
