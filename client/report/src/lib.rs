//! Moderator report synthesis.
//!
//! Two mutually exclusive modes per session: parse the backend's free-text
//! report, or fall back to a canned local analysis keyed by experiment type.

pub mod local;
pub mod parse;
pub mod synth;

pub use local::local_report;
pub use parse::{parse_raw_report, report_from_raw, RawSections};
pub use synth::{synthesize, ReportSource};
