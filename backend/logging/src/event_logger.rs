//! Session Event Logger
//!
//! Every session state transition becomes one structured record on the
//! `session_events` target, which the NDJSON file layer persists.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    UploadAccepted { file_name: String, kind: String },
    UploadRejected { file_name: String, reason: String },
    DocumentProcessed { file_name: String, chars: usize },
    DeckGenerated { cards: usize },
    AudioArmed { duration_secs: f64 },
    PlaybackFinished,
    SearchCompleted { query: String, results: usize },
    SessionReset,
}

#[derive(Debug, Serialize)]
pub struct SessionEventEntry {
    pub session_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub event: SessionEvent,
}

pub struct SessionEventLogger;

impl SessionEventLogger {
    pub fn entry(session_id: Uuid, event: SessionEvent) -> SessionEventEntry {
        SessionEventEntry {
            session_id,
            timestamp: Utc::now(),
            event,
        }
    }

    pub fn log(session_id: Uuid, event: SessionEvent) {
        let entry = Self::entry(session_id, event);
        let payload = serde_json::to_string(&entry.event).unwrap_or_default();
        info!(
            target: "session_events",
            session_id = %entry.session_id,
            timestamp = %entry.timestamp.to_rfc3339(),
            event = %payload,
            "Session event"
        );
    }
}
