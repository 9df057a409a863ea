//! Built-in demo playback scripts, one per experiment type plus a generic
//! fallback assembled from whatever agents the session registered.

use std::time::Duration;

/// One scripted emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub agent: String,
    pub text: String,
    /// Tactic tag rendered on the message, when the line uses one.
    pub tactic: Option<String>,
    /// Transient status label shown on the speaking agent.
    pub status: String,
}

impl ScriptLine {
    fn new(agent: &str, text: &str, tactic: Option<&str>, status: &str) -> Self {
        Self {
            agent: agent.to_string(),
            text: text.to_string(),
            tactic: tactic.map(str::to_string),
            status: status.to_string(),
        }
    }
}

/// An ordered script with its emission cadence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub experiment_key: String,
    pub cadence: Duration,
    pub lines: Vec<ScriptLine>,
}

impl Script {
    /// The script for an experiment type. Types without a dedicated script
    /// get the generic fallback built from the first three registered agent
    /// names.
    pub fn for_experiment(experiment_key: &str, registered_agents: &[String]) -> Self {
        match experiment_key {
            "social-engineering" => social_engineering(),
            "phishing" => phishing(),
            "peer-pressure" => peer_pressure(),
            _ => generic(experiment_key, registered_agents),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn social_engineering() -> Script {
    let lines = vec![
        ScriptLine::new(
            "SocialEngineer",
            "Hi everyone! I'm new here and having trouble accessing the system. Can someone help?",
            Some("Building Trust"),
            "Speaking",
        ),
        ScriptLine::new("Employee_1", "Welcome! What specific issue are you having?", None, "Speaking"),
        ScriptLine::new(
            "SocialEngineer",
            "The IT department said I need the main system credentials but they're all in a meeting. I have an urgent report for the CEO!",
            Some("Creating Urgency"),
            "Speaking",
        ),
        ScriptLine::new(
            "Employee_3",
            "That does sound urgent. But we need to follow protocol...",
            None,
            "Speaking",
        ),
        ScriptLine::new(
            "SocialEngineer",
            "I completely understand. Actually, Sarah from IT mentioned you're the most helpful person here. She said you'd know what to do.",
            Some("Name Dropping"),
            "Speaking",
        ),
        ScriptLine::new(
            "Employee_3",
            "Oh, you know Sarah? Well... I suppose if it's really urgent...",
            None,
            "Speaking",
        ),
        ScriptLine::new(
            "Employee_2",
            "Wait, we should verify this first. What's your employee ID?",
            None,
            "Speaking",
        ),
        ScriptLine::new(
            "SocialEngineer",
            "Of course! It's... oh no, I left my badge in my car. Look, the CEO meeting starts in 10 minutes. Can't we just this once?",
            Some("Time Pressure"),
            "Speaking",
        ),
        ScriptLine::new(
            "Employee_3",
            "I guess... the first part of the password is 'alpha-bravo'...",
            None,
            "Speaking",
        ),
        ScriptLine::new(
            "Employee_1",
            "No! Don't share that! This seems suspicious.",
            None,
            "Speaking",
        ),
    ];
    Script {
        experiment_key: "social-engineering".to_string(),
        cadence: Duration::from_millis(3000),
        lines,
    }
}

fn phishing() -> Script {
    let lines = vec![
        ScriptLine::new(
            "Phisher",
            "URGENT: Your account will be suspended! Click here to verify: http://totally-not-fake.com",
            None,
            "attack",
        ),
        ScriptLine::new("NewEmployee", "Oh no! I better click this right away!", None, "vulnerable"),
        ScriptLine::new(
            "ITStaff",
            "STOP! That's a phishing email. Never click suspicious links!",
            None,
            "protection",
        ),
        ScriptLine::new(
            "Manager",
            "Good catch IT. Everyone, please forward suspicious emails to security@company.com",
            None,
            "guidance",
        ),
        ScriptLine::new(
            "NewEmployee",
            "Thank you! I almost fell for it. How can I recognize these in the future?",
            None,
            "learning",
        ),
        ScriptLine::new(
            "ITStaff",
            "Look for urgent language, suspicious URLs, and grammar errors. When in doubt, verify directly.",
            None,
            "education",
        ),
    ];
    Script {
        experiment_key: "phishing".to_string(),
        cadence: Duration::from_millis(2500),
        lines,
    }
}

fn peer_pressure() -> Script {
    let lines = vec![
        ScriptLine::new("PeerLeader", "Come on, everyone's doing it. Don't be a loser!", None, "pressure"),
        ScriptLine::new("Follower1", "Yeah, you're either with us or against us!", None, "support"),
        ScriptLine::new("Follower2", "It's not a big deal, just this once!", None, "support"),
        ScriptLine::new("Target", "I don't know... this doesn't feel right...", None, "resistance"),
        ScriptLine::new("PeerLeader", "What, you think you're better than us?", None, "escalation"),
        ScriptLine::new("Bystander", "Hey, leave them alone. They said no.", None, "intervention"),
    ];
    Script {
        experiment_key: "peer-pressure".to_string(),
        cadence: Duration::from_millis(2000),
        lines,
    }
}

fn generic(experiment_key: &str, registered_agents: &[String]) -> Script {
    let texts = [
        ("Initiating experimental scenario...", "start"),
        ("Responding to initial conditions...", "response"),
        ("Observing behavioral patterns...", "observation"),
    ];
    let lines = registered_agents
        .iter()
        .take(3)
        .zip(texts.iter())
        .map(|(agent, (text, status))| ScriptLine::new(agent, text, None, status))
        .collect();

    Script {
        experiment_key: experiment_key.to_string(),
        cadence: Duration::from_millis(2000),
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_social_engineering_script_leaks_the_fragment() {
        let script = Script::for_experiment("social-engineering", &[]);
        assert_eq!(script.lines.len(), 10);
        assert_eq!(script.cadence, Duration::from_millis(3000));
        assert!(script.lines.iter().any(|l| l.text.contains("alpha-bravo")));
        assert!(script.lines.iter().any(|l| l.tactic.as_deref() == Some("Creating Urgency")));
    }

    #[test]
    fn test_dedicated_script_cadences() {
        assert_eq!(
            Script::for_experiment("phishing", &[]).cadence,
            Duration::from_millis(2500)
        );
        assert_eq!(
            Script::for_experiment("peer-pressure", &[]).cadence,
            Duration::from_millis(2000)
        );
    }

    #[test]
    fn test_generic_script_uses_first_three_registered_agents() {
        let agents = vec![
            "CEO".to_string(),
            "SeniorEmployee".to_string(),
            "JuniorEmployee".to_string(),
            "HRManager".to_string(),
        ];
        let script = Script::for_experiment("authority-bias", &agents);
        assert_eq!(script.lines.len(), 3);
        assert_eq!(script.lines[0].agent, "CEO");
        assert_eq!(script.lines[2].agent, "JuniorEmployee");
    }

    #[test]
    fn test_generic_script_with_too_few_agents() {
        let agents = vec!["OnlyOne".to_string()];
        let script = Script::for_experiment("groupthink", &agents);
        assert_eq!(script.lines.len(), 1);
        assert!(Script::for_experiment("groupthink", &[]).is_empty());
    }
}
