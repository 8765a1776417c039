use docanalyzer::application::services::{
    ANALYST_PERSONA, EXPANSION_MAX_TOKENS, EXPANSION_PERSONA, NO_TEXT_NOTICE, TRANSLATION_TEMPERATURE,
    TRANSLATOR_PERSONA, build_analysis_request, build_expansion_request,
    build_translation_request, image_data_uri,
};
use docanalyzer::domain::{
    ChatRole, ContentPart, DocumentAnalysis, ExtractedContent, MessageContent,
};

use crate::support::{file, pdf_file};

fn user_text(content: &MessageContent) -> &str {
    match content {
        MessageContent::Text(text) => text,
        MessageContent::Parts(_) => panic!("expected a text message"),
    }
}

#[test]
fn given_text_content_when_building_analysis_request_then_text_mode_prompt() {
    let request = build_analysis_request(&ExtractedContent::Text("Body text".into()), &pdf_file());

    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, ChatRole::System);
    assert_eq!(
        request.messages[0].content,
        MessageContent::Text(ANALYST_PERSONA.into())
    );
    let prompt = user_text(&request.messages[1].content);
    assert!(prompt.contains("\"contract.pdf\""));
    assert!(prompt.ends_with("Document Content:\nBody text"));
    assert_eq!(request.temperature, 0.7);
    assert_eq!(request.max_tokens, 2000);
}

#[test]
fn given_blank_text_when_building_analysis_request_then_notice_replaces_content() {
    let request = build_analysis_request(&ExtractedContent::Text("  \n".into()), &pdf_file());
    let prompt = user_text(&request.messages[1].content);
    assert!(prompt.ends_with(&format!("Document Content:\n{NO_TEXT_NOTICE}")));
}

#[test]
fn given_visual_content_when_building_analysis_request_then_image_part_attached() {
    let image = file("scan.png", "image/png", b"abc");
    let request = build_analysis_request(&ExtractedContent::Visual, &image);

    let MessageContent::Parts(parts) = &request.messages[1].content else {
        panic!("expected multimodal content");
    };
    assert_eq!(parts.len(), 2);
    assert!(matches!(&parts[0], ContentPart::Text { text } if text.contains("scan.png")));
    assert!(matches!(
        &parts[1],
        ContentPart::ImageUrl { image_url } if image_url.url == "data:image/png;base64,YWJj"
    ));
}

#[test]
fn given_blank_mime_when_building_data_uri_then_octet_stream() {
    let image = file("scan.jpg", "", b"abc");
    assert_eq!(image_data_uri(&image), "data:application/octet-stream;base64,YWJj");
}

#[test]
fn given_analysis_when_building_translation_request_then_language_and_json_embedded() {
    let analysis = DocumentAnalysis {
        executive_summary: "Summary".into(),
        ..DocumentAnalysis::default()
    };

    let request = build_translation_request(&analysis, "Norwegian");

    assert_eq!(
        request.messages[0].content,
        MessageContent::Text(TRANSLATOR_PERSONA.into())
    );
    let prompt = user_text(&request.messages[1].content);
    assert!(prompt.contains("to Norwegian"));
    assert!(prompt.contains("\"executiveSummary\": \"Summary\""));
    assert_eq!(request.temperature, TRANSLATION_TEMPERATURE);
}

#[test]
fn given_text_document_when_building_expansion_request_then_analysis_and_content_included() {
    let analysis = DocumentAnalysis {
        key_points: vec!["Point".into()],
        ..DocumentAnalysis::default()
    };

    let request = build_expansion_request(
        &analysis,
        &ExtractedContent::Text("Full text".into()),
        &pdf_file(),
    );

    assert_eq!(
        request.messages[0].content,
        MessageContent::Text(EXPANSION_PERSONA.into())
    );
    let prompt = user_text(&request.messages[1].content);
    assert!(prompt.contains("Current Analysis:"));
    assert!(prompt.contains("\"keyPoints\""));
    assert!(prompt.ends_with("Document Content:\nFull text"));
    assert_eq!(request.max_tokens, EXPANSION_MAX_TOKENS);
}

#[test]
fn given_visual_document_when_building_expansion_request_then_image_reattached() {
    let image = file("scan.png", "image/png", b"abc");
    let request = build_expansion_request(
        &DocumentAnalysis::default(),
        &ExtractedContent::Visual,
        &image,
    );

    assert!(matches!(&request.messages[1].content, MessageContent::Parts(parts) if parts.len() == 2));
}
