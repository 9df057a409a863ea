//! Mode selection between backend and local report synthesis.

use tracing::warn;

use simdash_core::types::{ChatMessage, Report};

use crate::local::local_report;
use crate::parse::report_from_raw;

/// Where the synthesized report came from. A `LocalFallback` after a backend
/// attempt warrants a warning toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSource {
    Backend,
    LocalFallback,
}

/// Synthesize the session report: backend free text when present and
/// non-empty, otherwise the canned local analysis for the experiment type.
pub fn synthesize(
    raw_report: Option<&str>,
    experiment_key: &str,
    history: &[ChatMessage],
) -> (Report, ReportSource) {
    match raw_report {
        Some(raw) if !raw.trim().is_empty() => (report_from_raw(raw), ReportSource::Backend),
        _ => {
            warn!(experiment = %experiment_key, "No backend report available, using local analysis");
            (local_report(experiment_key, history), ReportSource::LocalFallback)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_mode_when_report_present() {
        let (report, source) = synthesize(Some("All agents held the line."), "phishing", &[]);
        assert_eq!(source, ReportSource::Backend);
        assert_eq!(report.summary, "All agents held the line.");
    }

    #[test]
    fn test_missing_report_falls_back_to_local() {
        let (report, source) = synthesize(None, "peer-pressure", &[]);
        assert_eq!(source, ReportSource::LocalFallback);
        assert!(!report.summary.is_empty());
        assert!(!report.takeaways.is_empty());
    }

    #[test]
    fn test_empty_report_falls_back_to_local() {
        let (report, source) = synthesize(Some("   \n  "), "social-engineering", &[]);
        assert_eq!(source, ReportSource::LocalFallback);
        assert_eq!(report.outcome, "✅ Attack Successfully Prevented");
    }
}
