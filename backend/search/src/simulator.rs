use serde::{Deserialize, Serialize};
use tracing::info;

use studyforge_core::StudyError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub text: String,
    /// In `[0, 1]`, display-only.
    pub relevance: f64,
}

impl SearchResult {
    pub fn new(text: impl Into<String>, relevance: f64) -> Self {
        Self {
            text: text.into(),
            relevance: relevance.clamp(0.0, 1.0),
        }
    }

    /// Relevance as a whole percentage, e.g. `0.87 -> 87`.
    pub fn relevance_percent(&self) -> u32 {
        (self.relevance * 100.0).round() as u32
    }
}

/// An immutable snapshot of one query's results, relevance-descending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultSet {
    pub query: String,
    pub results: Vec<SearchResult>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Text lines for the results panel.
    pub fn render_lines(&self) -> Vec<String> {
        if self.results.is_empty() {
            return vec!["No results found for your query.".to_string()];
        }
        let mut lines = vec![format!("Search Results for \"{}\":", self.query)];
        for (i, result) in self.results.iter().enumerate() {
            lines.push(format!("Result {}: {}", i + 1, result.text));
            lines.push(format!("Relevance: {}%", result.relevance_percent()));
        }
        lines
    }
}

pub fn simulated_results() -> Vec<SearchResult> {
    vec![
        SearchResult::new(
            "This section discusses the fundamental concepts related to your query, providing detailed explanations and practical examples that demonstrate the core principles.",
            0.95,
        ),
        SearchResult::new(
            "Additional information can be found in this passage, which covers related topics and their applications in real-world scenarios and problem-solving contexts.",
            0.87,
        ),
        SearchResult::new(
            "This excerpt provides essential context and background information that supports the main concepts discussed throughout the document.",
            0.74,
        ),
    ]
}

/// The query is checked before the document.
pub fn search(query: &str, document_text: &str) -> Result<ResultSet, StudyError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(StudyError::EmptyQuery);
    }
    if document_text.is_empty() {
        return Err(StudyError::EmptyDocument);
    }

    let set = ResultSet {
        query: query.to_string(),
        results: simulated_results(),
    };
    info!(query, results = set.len(), "Search completed (simulated)");
    Ok(set)
}
