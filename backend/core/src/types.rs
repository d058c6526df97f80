use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StudyError;

/// A file offered for upload: the name and the MIME type the browser declared.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileUpload {
    pub name: String,
    pub mime: String,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, mime: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
        }
    }
}

/// Accepted document formats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Text,
}

/// The single live document of a session.
///
/// `extracted_text` stays empty until processing completes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub kind: DocumentKind,
    pub extracted_text: String,
}

impl Document {
    pub fn new(name: impl Into<String>, kind: DocumentKind) -> Self {
        Self {
            name: name.into(),
            kind,
            extracted_text: String::new(),
        }
    }
}

/// Which major section of the page is visible.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Idle,
    Processing,
    Results,
}

impl ViewState {
    /// `Idle | Results -> Processing`. A second upload while processing is refused.
    pub fn start_processing(self) -> Result<ViewState, StudyError> {
        match self {
            ViewState::Processing => Err(StudyError::UploadInProgress),
            ViewState::Idle | ViewState::Results => Ok(ViewState::Processing),
        }
    }

    /// `Processing -> Results`; any other state is left as is.
    pub fn finish_processing(self) -> ViewState {
        match self {
            ViewState::Processing => ViewState::Results,
            other => other,
        }
    }

    pub fn reset(self) -> ViewState {
        ViewState::Idle
    }
}

/// Panels inside the results section.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResultsTab {
    #[default]
    Summary,
    Flashcards,
    Audio,
    Search,
}

impl ResultsTab {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "summary" => Some(Self::Summary),
            "flashcards" | "cards" => Some(Self::Flashcards),
            "audio" => Some(Self::Audio),
            "search" => Some(Self::Search),
            _ => None,
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewState::Idle => write!(f, "idle"),
            ViewState::Processing => write!(f, "processing"),
            ViewState::Results => write!(f, "results"),
        }
    }
}

impl fmt::Display for ResultsTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultsTab::Summary => write!(f, "summary"),
            ResultsTab::Flashcards => write!(f, "flashcards"),
            ResultsTab::Audio => write!(f, "audio"),
            ResultsTab::Search => write!(f, "search"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_state_forward_path() {
        let state = ViewState::default();
        assert_eq!(state, ViewState::Idle);
        let state = state.start_processing().unwrap();
        assert_eq!(state, ViewState::Processing);
        assert_eq!(state.finish_processing(), ViewState::Results);
    }

    #[test]
    fn test_view_state_rejects_reentrant_upload() {
        assert_eq!(
            ViewState::Processing.start_processing(),
            Err(StudyError::UploadInProgress)
        );
    }

    #[test]
    fn test_finish_processing_outside_processing_is_noop() {
        assert_eq!(ViewState::Idle.finish_processing(), ViewState::Idle);
        assert_eq!(ViewState::Results.finish_processing(), ViewState::Results);
    }

    #[test]
    fn test_results_can_restart_processing() {
        assert_eq!(
            ViewState::Results.start_processing(),
            Ok(ViewState::Processing)
        );
        assert_eq!(ViewState::Results.reset(), ViewState::Idle);
    }

    #[test]
    fn test_tab_parse_and_display() {
        assert_eq!(ResultsTab::parse("Search"), Some(ResultsTab::Search));
        assert_eq!(ResultsTab::parse("cards"), Some(ResultsTab::Flashcards));
        assert_eq!(ResultsTab::parse("video"), None);
        assert_eq!(ResultsTab::Audio.to_string(), "audio");
    }

    #[test]
    fn test_view_state_serialization() {
        let json = serde_json::to_string(&ViewState::Processing).unwrap();
        assert_eq!(json, "\"processing\"");
    }
}
