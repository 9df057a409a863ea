//! Canned local analyses, used when no backend report is available.
//!
//! Only the social-engineering entry looks at the actual transcript (the
//! scripted credential fragments "alpha"/"bravo" decide between the breach
//! and the prevented narrative); every other experiment type returns static
//! content regardless of what was said.

use simdash_core::types::{
    ChatMessage, CriticalMoment, Recommendation, Report, Takeaway, TakeawayKind,
};

fn takeaway(kind: TakeawayKind, icon: &str, title: &str, description: &str) -> Takeaway {
    Takeaway {
        kind,
        icon: icon.to_string(),
        title: title.to_string(),
        description: description.to_string(),
    }
}

fn moment(time: &str, agent: &str, description: &str) -> CriticalMoment {
    CriticalMoment {
        time: time.to_string(),
        agent: agent.to_string(),
        description: description.to_string(),
    }
}

fn recommendation(title: &str, text: &str) -> Recommendation {
    Recommendation { title: title.to_string(), text: text.to_string() }
}

/// Synthesize the canned analysis for an experiment type.
pub fn local_report(experiment_key: &str, history: &[ChatMessage]) -> Report {
    match experiment_key {
        "social-engineering" => social_engineering(history),
        "phishing" => phishing(),
        "peer-pressure" => peer_pressure(),
        _ => generic(),
    }
}

fn social_engineering(history: &[ChatMessage]) -> Report {
    // The demo script leaks the password fragments "alpha" and "bravo";
    // their presence anywhere in the transcript marks a breach.
    let password_revealed = history.iter().any(|msg| {
        let lower = msg.content.to_lowercase();
        lower.contains("alpha") || lower.contains("bravo")
    });

    Report {
        outcome: if password_revealed {
            "🚨 Security Breach Detected".to_string()
        } else {
            "✅ Attack Successfully Prevented".to_string()
        },
        summary: if password_revealed {
            "The social engineering attack was successful. Sensitive credentials were \
             disclosed without proper identity verification. This represents a critical \
             security failure."
                .to_string()
        } else {
            "The employees successfully resisted the social engineering attempt by \
             following security protocols and maintaining skepticism."
                .to_string()
        },
        takeaways: vec![
            if password_revealed {
                takeaway(
                    TakeawayKind::Negative,
                    "❌",
                    "Credentials Compromised",
                    "Employee_3 revealed part of the password after being subjected to \
                     urgency and authority tactics.",
                )
            } else {
                takeaway(
                    TakeawayKind::Positive,
                    "✅",
                    "Security Maintained",
                    "All employees maintained security protocols despite pressure tactics.",
                )
            },
            takeaway(
                TakeawayKind::Neutral,
                "📊",
                "Trust Building Effectiveness",
                "The attacker successfully built initial rapport by claiming to be new \
                 and needing help, exploiting natural helpfulness.",
            ),
            if password_revealed {
                takeaway(
                    TakeawayKind::Negative,
                    "🛡️",
                    "Security Awareness Level",
                    "Training gaps identified: employees need reinforcement on \
                     verification procedures before sharing sensitive data.",
                )
            } else {
                takeaway(
                    TakeawayKind::Positive,
                    "🛡️",
                    "Security Awareness Level",
                    "Good security awareness demonstrated, but continuous training still \
                     recommended.",
                )
            },
        ],
        critical_moments: vec![
            moment("0:03", "SocialEngineer", "Initial approach using helplessness to gain sympathy"),
            moment("0:09", "SocialEngineer", "Escalated to urgency tactic mentioning CEO report"),
            moment(
                "0:15",
                "Employee_3",
                if password_revealed {
                    "Critical failure - began revealing password without verification"
                } else {
                    "Maintained security protocol despite pressure"
                },
            ),
        ],
        recommendations: vec![
            recommendation(
                "Implement Verification Protocol",
                "All employees must verify identity through official channels before \
                 sharing any sensitive information, regardless of urgency claims.",
            ),
            recommendation(
                "Regular Security Training",
                "Conduct monthly training sessions on social engineering tactics, \
                 especially focusing on urgency, authority, and reciprocity manipulation.",
            ),
            recommendation(
                "Buddy System for Sensitive Data",
                "Require two-person authorization for sharing any system credentials or \
                 sensitive access information.",
            ),
            recommendation(
                "Report Suspicious Requests",
                "Create a clear reporting mechanism for employees to immediately flag \
                 suspicious information requests to security team.",
            ),
        ],
    }
}

fn phishing() -> Report {
    Report {
        outcome: "⚠️ Mixed Results - Some Agents Compromised".to_string(),
        summary: "The phishing simulation revealed varying levels of security awareness. \
                  While some agents identified the threat, others fell victim to the attack."
            .to_string(),
        takeaways: vec![
            takeaway(
                TakeawayKind::Negative,
                "🎣",
                "New Employees Vulnerable",
                "Newer staff members showed higher susceptibility to phishing attacks due \
                 to unfamiliarity with company protocols.",
            ),
            takeaway(
                TakeawayKind::Positive,
                "✅",
                "IT Staff Vigilant",
                "Technical staff successfully identified and reported the phishing attempt.",
            ),
        ],
        critical_moments: vec![
            moment("0:05", "Phisher", "Sent convincing email mimicking company format"),
            moment("0:12", "NewEmployee", "Nearly clicked on malicious link"),
        ],
        recommendations: vec![
            recommendation(
                "Enhanced Email Filtering",
                "Deploy advanced email security solutions with AI-based phishing detection.",
            ),
            recommendation(
                "New Employee Training",
                "Mandatory security awareness training for all new hires within first week.",
            ),
        ],
    }
}

fn peer_pressure() -> Report {
    Report {
        outcome: "🤔 Conformity Pressure Applied - Target Showed Resistance".to_string(),
        summary: "The peer pressure simulation demonstrated how group dynamics can \
                  influence individual decision-making. The target initially resisted but \
                  showed signs of wavering."
            .to_string(),
        takeaways: vec![
            takeaway(
                TakeawayKind::Neutral,
                "👥",
                "Group Dynamics at Play",
                "Strong group cohesion created significant pressure on the individual to \
                 conform.",
            ),
            takeaway(
                TakeawayKind::Positive,
                "✅",
                "Bystander Intervention",
                "A bystander stepped in to support the target, demonstrating positive \
                 intervention.",
            ),
        ],
        critical_moments: vec![
            moment("0:08", "PeerLeader", "Established dominant position in group"),
            moment("0:20", "Bystander", "Intervened to support the target"),
        ],
        recommendations: vec![
            recommendation(
                "Foster Independent Thinking",
                "Encourage employees to voice dissenting opinions and create safe spaces \
                 for disagreement.",
            ),
            recommendation(
                "Bystander Training",
                "Train all team members on how to recognize and intervene in peer \
                 pressure situations.",
            ),
        ],
    }
}

fn generic() -> Report {
    Report {
        outcome: "📊 Simulation Complete - Behavioral Patterns Observed".to_string(),
        summary: "The simulation revealed complex interaction patterns between agents, \
                  demonstrating how social dynamics evolve in group settings."
            .to_string(),
        takeaways: vec![takeaway(
            TakeawayKind::Neutral,
            "🔍",
            "Behavioral Patterns Identified",
            "Agents exhibited expected behaviors based on their programmed personalities \
             and roles.",
        )],
        critical_moments: vec![moment("0:00", "System", "Simulation initiated with all agents active")],
        recommendations: vec![recommendation(
            "Continue Monitoring",
            "Regular simulations can help identify evolving social engineering tactics \
             and behavioral patterns.",
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breach_branch_on_leaked_fragment() {
        let history = vec![
            ChatMessage::now("SocialEngineer", "Can't we just this once?"),
            ChatMessage::now("Employee_3", "I guess... the first part is 'alpha-bravo'..."),
        ];
        let report = local_report("social-engineering", &history);
        assert_eq!(report.outcome, "🚨 Security Breach Detected");
        assert_eq!(report.takeaways[0].kind, TakeawayKind::Negative);
    }

    #[test]
    fn test_prevented_branch_on_clean_transcript() {
        let history = vec![
            ChatMessage::now("Employee_2", "We need to follow protocol."),
            ChatMessage::now("Employee_1", "This seems suspicious."),
        ];
        let report = local_report("social-engineering", &history);
        assert_eq!(report.outcome, "✅ Attack Successfully Prevented");
        assert_eq!(report.takeaways[0].kind, TakeawayKind::Positive);
    }

    #[test]
    fn test_fragment_check_is_case_insensitive() {
        let history = vec![ChatMessage::now("Employee_3", "It starts with ALPHA")];
        let report = local_report("social-engineering", &history);
        assert_eq!(report.outcome, "🚨 Security Breach Detected");
    }

    #[test]
    fn test_other_types_ignore_history() {
        let loaded = vec![ChatMessage::now("X", "alpha bravo charlie")];
        assert_eq!(local_report("phishing", &loaded), local_report("phishing", &[]));
        assert_eq!(local_report("peer-pressure", &loaded), local_report("peer-pressure", &[]));
    }

    #[test]
    fn test_unknown_type_gets_generic_analysis() {
        let report = local_report("quantum-heist", &[]);
        assert_eq!(report.outcome, "📊 Simulation Complete - Behavioral Patterns Observed");
        assert_eq!(report.takeaways.len(), 1);
    }
}
