use base64::{Engine as _, engine::general_purpose};

use crate::domain::{
    ChatMessage, ChatRequest, ContentPart, DocumentAnalysis, DocumentFile, ExtractedContent,
    ImageUrl,
};

pub const ANALYST_PERSONA: &str =
    "You are an expert document analyst. Analyze documents and provide structured insights.";
pub const TRANSLATOR_PERSONA: &str = "You are a professional translator.";
pub const EXPANSION_PERSONA: &str =
    "You are an expert document analyst providing detailed insights.";

pub const ANALYSIS_TEMPERATURE: f32 = 0.7;
pub const TRANSLATION_TEMPERATURE: f32 = 0.3;
pub const ANALYSIS_MAX_TOKENS: u32 = 2000;
pub const EXPANSION_MAX_TOKENS: u32 = 3000;

pub const DOCUMENT_CONTENT_HEADER: &str = "Document Content:";
pub const NO_TEXT_NOTICE: &str = "No text could be extracted from the document.";

const JSON_ONLY: &str = "Respond with a single JSON object only, with no prose before or after it.";

/// Instruction prompt describing the required output schema.
pub fn analysis_prompt(filename: &str) -> String {
    format!(
        r#"Analyze the following document "{filename}" and provide a comprehensive analysis in JSON format with the following structure:
{{
  "executiveSummary": "A concise 2-3 sentence summary of the document",
  "keyPoints": ["Point 1", "Point 2", "Point 3"],
  "risks": [
    {{"level": "high|medium|low", "description": "Risk description"}}
  ],
  "nextActions": ["Action 1", "Action 2", "Action 3"]
}}

Focus on:
- Main themes and purpose
- Critical information and decisions
- Potential risks, concerns, or red flags
- Actionable next steps
- Important dates, deadlines, or commitments

Provide 3-5 key points, identify all significant risks with an explicit severity level of high, medium or low, and suggest 3-5 concrete next actions.
{JSON_ONLY}"#
    )
}

/// Initial analysis (and regenerate) request, in text or vision mode.
pub fn build_analysis_request(content: &ExtractedContent, file: &DocumentFile) -> ChatRequest {
    let prompt = analysis_prompt(&file.name);
    let user = match content {
        ExtractedContent::Visual => ChatMessage::user_parts(vec![
            ContentPart::Text { text: prompt },
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: image_data_uri(file),
                },
            },
        ]),
        ExtractedContent::Text(text) => {
            ChatMessage::user(format!("{prompt}\n\n{}", document_section(text)))
        }
    };

    ChatRequest {
        messages: vec![ChatMessage::system(ANALYST_PERSONA), user],
        temperature: ANALYSIS_TEMPERATURE,
        max_tokens: ANALYSIS_MAX_TOKENS,
    }
}

pub fn build_translation_request(analysis: &DocumentAnalysis, language: &str) -> ChatRequest {
    let prompt = format!(
        "Translate the following document analysis to {language}. Maintain the exact same JSON structure:\n\n{}\n\nReturn only the translated JSON, keeping all field names in English but translating all content values.\n{JSON_ONLY}",
        analysis.to_prompt_json()
    );

    ChatRequest {
        messages: vec![ChatMessage::system(TRANSLATOR_PERSONA), ChatMessage::user(prompt)],
        temperature: TRANSLATION_TEMPERATURE,
        max_tokens: ANALYSIS_MAX_TOKENS,
    }
}

/// Expansion request carrying both the current analysis and the document.
///
/// Vision-mode documents are re-attached as an image instead of a text section.
pub fn build_expansion_request(
    analysis: &DocumentAnalysis,
    content: &ExtractedContent,
    file: &DocumentFile,
) -> ChatRequest {
    let prompt = format!(
        "Based on this document, expand the following analysis with more detail and depth. Add more key points, identify additional risks, and suggest more specific next actions than the current analysis contains.\n\nCurrent Analysis:\n{}\n\nProvide an expanded analysis in the same JSON format with more comprehensive insights.\n{JSON_ONLY}",
        analysis.to_prompt_json()
    );

    let user = match content {
        ExtractedContent::Text(text) => {
            ChatMessage::user(format!("{prompt}\n\n{}", document_section(text)))
        }
        ExtractedContent::Visual => ChatMessage::user_parts(vec![
            ContentPart::Text { text: prompt },
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: image_data_uri(file),
                },
            },
        ]),
    };

    ChatRequest {
        messages: vec![ChatMessage::system(EXPANSION_PERSONA), user],
        temperature: ANALYSIS_TEMPERATURE,
        max_tokens: EXPANSION_MAX_TOKENS,
    }
}

pub fn image_data_uri(file: &DocumentFile) -> String {
    let b64 = general_purpose::STANDARD.encode(&file.content);
    format!("data:{};base64,{b64}", file.effective_mime())
}

fn document_section(text: &str) -> String {
    let body = if text.trim().is_empty() {
        NO_TEXT_NOTICE
    } else {
        text
    };
    format!("{DOCUMENT_CONTENT_HEADER}\n{body}")
}
