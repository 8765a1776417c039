use serde_json::{Map, Value};

use crate::domain::{DocumentAnalysis, NO_SUMMARY_PLACEHOLDER, Risk, RiskLevel};

use super::PipelineError;

const SUMMARY_KEYS: &[&str] = &["executiveSummary", "executive_summary"];
const KEY_POINT_KEYS: &[&str] = &["keyPoints", "key_points"];
const NEXT_ACTION_KEYS: &[&str] = &["nextActions", "next_actions", "actions"];
const RISK_DESCRIPTION_KEYS: &[&str] = &["description", "desc"];

/// Decodes model output into the canonical analysis, applying every key fallback and default.
pub fn decode_analysis(raw: &str) -> Result<DocumentAnalysis, PipelineError> {
    let value: Value = serde_json::from_str(strip_code_fence(raw))
        .map_err(|e| PipelineError::MalformedResponse(e.to_string()))?;

    let object = value.as_object().ok_or_else(|| {
        PipelineError::MalformedResponse("expected a JSON object at the top level".to_string())
    })?;

    let executive_summary = first_present(object, SUMMARY_KEYS)
        .map(value_text)
        .unwrap_or_else(|| NO_SUMMARY_PLACEHOLDER.to_string());

    let key_points = string_list(first_present(object, KEY_POINT_KEYS), "keyPoints")?;
    let next_actions = string_list(first_present(object, NEXT_ACTION_KEYS), "nextActions")?;

    let risks = match object.get("risks") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .filter(|item| !item.is_null())
            .map(decode_risk)
            .collect(),
        Some(_) => {
            return Err(PipelineError::MalformedResponse(
                "risks must be an array".to_string(),
            ));
        }
    };

    Ok(DocumentAnalysis {
        executive_summary,
        key_points,
        risks,
        next_actions,
        extracted: None,
    })
}

fn decode_risk(item: &Value) -> Risk {
    let Some(fields) = item.as_object() else {
        return Risk::new(RiskLevel::Medium, value_text(item));
    };

    let level = fields
        .get("level")
        .and_then(Value::as_str)
        .map(RiskLevel::parse_lenient)
        .unwrap_or_default();

    let description = first_present(fields, RISK_DESCRIPTION_KEYS)
        .map(value_text)
        .unwrap_or_else(|| item.to_string());

    Risk::new(level, description)
}

/// First key holding something other than null or a blank string.
fn first_present<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find(|value| match value {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            _ => true,
        })
}

fn string_list(value: Option<&Value>, field: &str) -> Result<Vec<String>, PipelineError> {
    match value {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items
            .iter()
            .filter(|item| !item.is_null())
            .map(list_item_text)
            .collect()),
        Some(_) => Err(PipelineError::MalformedResponse(format!(
            "{field} must be an array"
        ))),
    }
}

/// List entries keep the model's text as written, blank strings included.
fn list_item_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) if !s.trim().is_empty() => s.clone(),
        other => other.to_string(),
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}
