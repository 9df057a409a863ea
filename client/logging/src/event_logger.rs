//! Session Event Logger
//!
//! Structured session events (messages, status transitions, feed errors)
//! written through the tracing NDJSON pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    Message {
        agent: String,
        content: String,
    },
    StatusTransition {
        experiment_id: String,
        status: String,
    },
    FeedFailure {
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub generation: u64,
    pub timestamp: DateTime<Utc>,
    pub event: SessionEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Record a session event, immediately serializing it to the tracing
    /// system under the `session_events` target.
    pub fn log_event(generation: u64, event: SessionEvent) {
        let entry = EventLogEntry {
            generation,
            timestamp: Utc::now(),
            event,
        };

        info!(target: "session_events", event = ?entry, "Session trace event");
    }
}
