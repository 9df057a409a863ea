//! Telemetry and structured logging for the simdash client.
//!
//! Handles console output, NDJSON file rotation, and session event tracing.

pub mod event_logger;
pub mod logger;

pub use event_logger::{EventLogEntry, EventLogger, SessionEvent};
pub use logger::init_logger;
