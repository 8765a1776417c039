/// How the analysis request presents the document to the language model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    Text,
    Vision,
}

/// Result of the extraction stage.
///
/// `Visual` means no text was obtained and the original bytes must be sent as an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedContent {
    Text(String),
    Visual,
}

impl ExtractedContent {
    pub fn mode(&self) -> AnalysisMode {
        match self {
            ExtractedContent::Text(_) => AnalysisMode::Text,
            ExtractedContent::Visual => AnalysisMode::Vision,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            ExtractedContent::Text(text) => Some(text),
            ExtractedContent::Visual => None,
        }
    }
}
