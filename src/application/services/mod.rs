mod analysis_client;
mod analysis_pipeline;
mod cancellation;
mod file_validator;
mod pipeline_controller;
mod pipeline_error;
mod request_builder;
mod response_decoder;
mod text_extractor;

pub use analysis_client::{AnalysisClient, llm_credentials};
pub use analysis_pipeline::{AnalysisPipeline, NewDocument};
pub use file_validator::{ValidationResult, validate_file};
pub use pipeline_controller::{PipelineController, PipelineRun, TriggerError};
pub use pipeline_error::{PipelineError, error_title};
pub use request_builder::{
    ANALYSIS_MAX_TOKENS, ANALYSIS_TEMPERATURE, ANALYST_PERSONA, DOCUMENT_CONTENT_HEADER,
    EXPANSION_MAX_TOKENS, EXPANSION_PERSONA, NO_TEXT_NOTICE, TRANSLATION_TEMPERATURE,
    TRANSLATOR_PERSONA, analysis_prompt, build_analysis_request, build_expansion_request,
    build_translation_request, image_data_uri,
};
pub use response_decoder::decode_analysis;
pub use text_extractor::{
    MAX_POLL_ATTEMPTS, PDF_PLACEHOLDER_NOTE, POLL_INTERVAL, TextExtractor, fallback_content,
};
