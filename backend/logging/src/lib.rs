//! Telemetry and structured logging for StudyForge.
//!
//! Console output, optional daily-rotated NDJSON files, and a dedicated
//! session event stream.

pub mod event_logger;
pub mod logger;

pub use event_logger::{SessionEvent, SessionEventEntry, SessionEventLogger};
pub use logger::init_logger;
