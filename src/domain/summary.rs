use super::DocumentAnalysis;

/// Renders the plain-text `documentSummary` field.
///
/// Sections appear in a fixed order; empty collections drop their section entirely.
pub fn format_summary(analysis: &DocumentAnalysis) -> String {
    let mut sections = vec![format!("EXECUTIVE SUMMARY:\n{}", analysis.executive_summary)];

    if !analysis.key_points.is_empty() {
        sections.push(format!("KEY POINTS:\n{}", numbered(&analysis.key_points)));
    }

    if !analysis.risks.is_empty() {
        let risks: Vec<String> = analysis
            .risks
            .iter()
            .map(|r| format!("[{}] {}", r.level.as_str().to_uppercase(), r.description))
            .collect();
        sections.push(format!("RISKS IDENTIFIED:\n{}", numbered(&risks)));
    }

    if !analysis.next_actions.is_empty() {
        sections.push(format!("NEXT ACTIONS:\n{}", numbered(&analysis.next_actions)));
    }

    sections.join("\n\n")
}

fn numbered(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}
