pub mod attachments;
pub mod http;
pub mod llm;
pub mod observability;
pub mod text_processing;
