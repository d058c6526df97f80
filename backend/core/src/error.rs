use thiserror::Error;

/// Top-level error type for StudyForge session operations.
///
/// Every variant is a recoverable user condition: callers surface it as a
/// warning notification and leave session state untouched.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StudyError {
    #[error("unsupported file type for '{name}' (declared mime: '{mime}')")]
    UnsupportedType { name: String, mime: String },

    #[error("no document has been processed yet")]
    EmptyDocument,

    #[error("search query is empty")]
    EmptyQuery,

    #[error("a document is already being processed")]
    UploadInProgress,

    #[error("channel closed: {0}")]
    ChannelClosed(String),
}

impl StudyError {
    /// The warning text shown to the user for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            StudyError::UnsupportedType { .. } => "Please upload a PDF or text file.",
            StudyError::EmptyDocument => "Please upload a document first!",
            StudyError::EmptyQuery => "Please enter a search query!",
            StudyError::UploadInProgress => "A document is already being processed.",
            StudyError::ChannelClosed(_) => "The study session has ended.",
        }
    }
}
