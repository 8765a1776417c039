const MAX_VISIBLE_CHARS: usize = 100;

const SENSITIVE_PATTERNS: [&str; 7] = [
    "Bearer ",
    "api_key=",
    "api-key:",
    "Ocp-Apim-Subscription-Key:",
    "password=",
    "secret=",
    "token=",
];

/// Sanitizes prompt and response text for safe logging: truncates long text
/// and masks credential-looking values.
pub fn sanitize_prompt(prompt: &str) -> String {
    let trimmed = prompt.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total_chars = trimmed.chars().count();
    let visible = if total_chars > MAX_VISIBLE_CHARS {
        let cut = trimmed
            .char_indices()
            .nth(MAX_VISIBLE_CHARS)
            .map(|(i, _)| i)
            .unwrap_or(trimmed.len());
        format!("{}... ({} chars total)", &trimmed[..cut], total_chars)
    } else {
        trimmed.to_string()
    };

    redact_sensitive_patterns(&visible)
}

fn redact_sensitive_patterns(text: &str) -> String {
    let mut result = text.to_string();
    for pattern in SENSITIVE_PATTERNS {
        result = redact_pattern(&result, pattern);
    }
    result
}

fn redact_pattern(text: &str, pattern: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(idx) = rest.find(pattern) {
        let value_start = idx + pattern.len();
        let value = &rest[value_start..];
        let skipped = value.len() - value.trim_start_matches(' ').len();
        let value_len = value[skipped..]
            .find(|c: char| c.is_whitespace() || matches!(c, '&' | '"' | '\'' | ',' | '}'))
            .unwrap_or(value.len() - skipped);

        out.push_str(&rest[..value_start]);
        out.push_str(&value[..skipped]);
        out.push_str("[REDACTED]");
        rest = &value[skipped + value_len..];
    }

    out.push_str(rest);
    out
}
