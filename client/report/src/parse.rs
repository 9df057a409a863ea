//! Heuristic classification of the backend's free-text moderator report.
//!
//! The backend gives no structure, only prose; lines are sorted into
//! takeaways and recommendations by keyword. A line matching both keyword
//! sets lands in both lists; the classification is deliberately lenient.

use simdash_core::types::{CriticalMoment, Report, Takeaway, TakeawayKind};

const TAKEAWAY_KEYWORDS: &[&str] = &["takeaway", "insight", "finding"];
const RECOMMENDATION_KEYWORDS: &[&str] = &["recommend", "suggest", "should"];

/// Raw report content, bucketed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawSections {
    /// The first non-empty line.
    pub summary: String,
    pub takeaways: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Split a raw report into sections by keyword.
pub fn parse_raw_report(raw: &str) -> RawSections {
    let lines: Vec<&str> = raw.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    let mut sections = RawSections {
        summary: lines.first().map(|l| l.to_string()).unwrap_or_default(),
        ..Default::default()
    };

    for line in &lines {
        let lower = line.to_lowercase();
        if TAKEAWAY_KEYWORDS.iter().any(|k| lower.contains(k)) {
            sections.takeaways.push(line.to_string());
        }
        if RECOMMENDATION_KEYWORDS.iter().any(|k| lower.contains(k)) {
            sections.recommendations.push(line.to_string());
        }
    }

    sections
}

/// Build a full report entity from the backend's raw text. Takeaways are
/// neutral with a generic icon; the full text is preserved as a single
/// timeline entry so nothing the moderator wrote is lost.
pub fn report_from_raw(raw: &str) -> Report {
    let sections = parse_raw_report(raw);

    Report {
        outcome: "📊 AI Moderator Analysis".to_string(),
        summary: sections.summary,
        takeaways: sections
            .takeaways
            .into_iter()
            .map(|line| Takeaway {
                kind: TakeawayKind::Neutral,
                icon: TakeawayKind::Neutral.icon().to_string(),
                title: "Key Insight".to_string(),
                description: line,
            })
            .collect(),
        critical_moments: vec![CriticalMoment {
            time: "Full analysis".to_string(),
            agent: "Moderator".to_string(),
            description: raw.trim().to_string(),
        }],
        recommendations: sections
            .recommendations
            .into_iter()
            .map(|line| simdash_core::types::Recommendation {
                title: "Recommendation".to_string(),
                text: line,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "\
The attackers extracted partial credentials on day two.

Key finding: urgency tactics were the most effective lever.
Employees should verify identity before sharing anything sensitive.
A further insight: rapport-building preceded every disclosure.
";

    #[test]
    fn test_first_line_is_summary() {
        let sections = parse_raw_report(RAW);
        assert_eq!(sections.summary, "The attackers extracted partial credentials on day two.");
    }

    #[test]
    fn test_keyword_bucketing() {
        let sections = parse_raw_report(RAW);
        assert_eq!(sections.takeaways.len(), 2);
        assert_eq!(sections.recommendations.len(), 1);
        assert!(sections.recommendations[0].contains("should verify"));
    }

    #[test]
    fn test_ambiguous_line_lands_in_both_buckets() {
        let sections =
            parse_raw_report("Summary line.\nOur finding: teams should run monthly drills.");
        assert_eq!(sections.takeaways.len(), 1);
        assert_eq!(sections.recommendations.len(), 1);
        assert_eq!(sections.takeaways[0], sections.recommendations[0]);
    }

    #[test]
    fn test_empty_report_parses_to_empty_sections() {
        let sections = parse_raw_report("\n\n  \n");
        assert!(sections.summary.is_empty());
        assert!(sections.takeaways.is_empty());
        assert!(sections.recommendations.is_empty());
    }

    #[test]
    fn test_report_from_raw_preserves_full_text() {
        let report = report_from_raw(RAW);
        assert_eq!(report.critical_moments.len(), 1);
        assert!(report.critical_moments[0].description.contains("rapport-building"));
        assert!(report.takeaways.iter().all(|t| t.title == "Key Insight"));
    }
}
