use tracing::debug;

use crate::topics::{DEFAULT_TOPIC, TOPICS};

/// Characters of extracted text shown in the document preview.
pub const PREVIEW_CHARS: usize = 1000;

const SENTENCE_SEPARATOR: &str = ". ";
const BULLET_BREAK: &str = "<br>• ";
const SUMMARY_ATTRIBUTION: &str =
    "<em>This summary was generated using AI analysis of your uploaded document.</em>";

/// Canned "extracted" text for a filename, matched case-insensitively.
pub fn extract(filename: &str) -> String {
    let lowered = filename.to_lowercase();
    let topic = TOPICS
        .iter()
        .find(|t| lowered.contains(t.key))
        .copied()
        .unwrap_or(DEFAULT_TOPIC);
    debug!(filename, topic = topic.key, "Extracted canned text");
    topic.text.to_string()
}

/// The first two `". "`-separated pieces joined back with `". "`, plus a period.
///
/// A second piece that already ends with `.` keeps it, giving `".."`.
pub fn key_points(text: &str) -> String {
    let head: Vec<&str> = text.split(SENTENCE_SEPARATOR).take(2).collect();
    format!("{}.", head.join(SENTENCE_SEPARATOR))
}

/// Key points as an HTML bullet list with the attribution line.
///
/// Only the first separator becomes a bullet break.
pub fn summarize(text: &str) -> String {
    let points = key_points(text).replacen(SENTENCE_SEPARATOR, BULLET_BREAK, 1);
    format!("<strong>Key Points:</strong><br>• {points}<br><br>{SUMMARY_ATTRIBUTION}")
}

pub fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
