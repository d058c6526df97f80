//! The StudyForge session: one owner for all mutable state.
//!
//! [`SessionState`] holds the transitions as plain synchronous methods.
//! [`SessionActor`] wraps it in a tokio task, schedules the processing,
//! arm, and tick timers, and emits notifications. Callers talk to it
//! through a cloneable [`SessionHandle`].

pub mod actor;
pub mod keys;
pub mod state;
pub mod timers;
pub mod upload;

pub use actor::{SessionActor, SessionConfig, SessionHandle};
pub use keys::Key;
pub use state::{SessionSnapshot, SessionState};
pub use upload::classify;

pub const MSG_PROCESSED: &str = "Document processed successfully!";
pub const MSG_FLASHCARDS: &str = "Flashcards generated successfully!";
pub const MSG_AUDIO_READY: &str = "Audio generated successfully! Click play to listen.";
pub const MSG_SEARCH: &str = "Search completed successfully!";
