mod azure_doc_intel_adapter;
mod mock_extraction_service;

pub use azure_doc_intel_adapter::{
    API_VERSION, AnalyzeResponse, AnalyzeResult, AzureDocIntelAdapter, OPERATION_LOCATION_HEADER,
    READ_MODEL_PATH, SUBSCRIPTION_KEY_HEADER,
};
pub use mock_extraction_service::MockExtractionService;
