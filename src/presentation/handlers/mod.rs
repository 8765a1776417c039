mod actions;
mod analysis;
mod documents;
mod health;
mod responses;

pub use actions::{
    TranslateRequest, cancel_handler, expand_handler, regenerate_handler, reset_handler,
    translate_handler,
};
pub use analysis::{AnalysisView, ErrorView, analysis_handler};
pub use documents::{UploadParams, upload_document_handler};
pub use health::health_handler;
pub use responses::{ErrorResponse, RunAccepted};
