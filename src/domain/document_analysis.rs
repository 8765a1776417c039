use serde::{Deserialize, Serialize};

use super::{ExtractedContent, Risk};

pub const NO_SUMMARY_PLACEHOLDER: &str = "No summary available";

/// Canonical analysis shape. Replaced wholesale by every run, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAnalysis {
    pub executive_summary: String,
    pub key_points: Vec<String>,
    pub risks: Vec<Risk>,
    pub next_actions: Vec<String>,
    /// Extraction result kept so regenerate/expand can skip the extraction service.
    #[serde(skip)]
    pub extracted: Option<ExtractedContent>,
}

impl Default for DocumentAnalysis {
    fn default() -> Self {
        Self {
            executive_summary: NO_SUMMARY_PLACEHOLDER.to_string(),
            key_points: Vec::new(),
            risks: Vec::new(),
            next_actions: Vec::new(),
            extracted: None,
        }
    }
}

impl DocumentAnalysis {
    pub fn with_extracted(mut self, extracted: Option<ExtractedContent>) -> Self {
        self.extracted = extracted;
        self
    }

    /// Pretty JSON of the four content fields, as embedded in follow-up prompts.
    pub fn to_prompt_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
