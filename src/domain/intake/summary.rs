//! Human-readable summaries of collected intake data.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::question::QuestionSet;

/// Sentinel returned when a conversation has no recorded answers.
pub const NO_DATA_SUMMARY: &str = "No information collected yet.";

/// Display names for the well-known intake fields. Unlisted fields render
/// under their raw name.
static FIELD_LABELS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("version", "Version"),
        ("environment", "Environment"),
        ("specific_case", "Specific case"),
        ("error_details", "Error details"),
    ])
});

/// Returns the display name for a field, falling back to the raw name.
pub fn field_label(name: &str) -> &str {
    FIELD_LABELS.get(name).copied().unwrap_or(name)
}

/// Renders answers as a bullet list, one line per recorded answer.
///
/// Lines follow the question sequence, which is also submission order.
pub(crate) fn render(questions: &QuestionSet, answers: &HashMap<String, String>) -> String {
    let mut lines = Vec::new();
    for question in questions.iter() {
        if let Some(value) = answers.get(&question.name) {
            lines.push(format!("- {}: {}", field_label(&question.name), value));
        }
    }
    lines.join("\n")
}
