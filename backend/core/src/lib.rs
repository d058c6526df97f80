pub mod error;
pub mod event;
pub mod types;

pub use error::StudyError;
pub use event::{Notification, Severity};
pub use types::{Document, DocumentKind, FileUpload, ResultsTab, ViewState};
