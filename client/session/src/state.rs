use std::collections::HashMap;

use tracing::debug;

use simdash_core::catalog::ExperimentInfo;
use simdash_core::types::{AgentProfile, ChatMessage, Template};

use crate::wizard::WizardStep;

/// Registry of the agents participating in the current session, in display
/// order. Messages may reference agents that were never registered; lookups
/// fall back to a default profile instead of failing.
#[derive(Debug, Default, Clone)]
pub struct AgentRegistry {
    profiles: HashMap<String, AgentProfile>,
    order: Vec<String>,
}

impl AgentRegistry {
    pub fn insert(&mut self, profile: AgentProfile) {
        if !self.profiles.contains_key(&profile.name) {
            self.order.push(profile.name.clone());
        }
        self.profiles.insert(profile.name.clone(), profile);
    }

    pub fn get(&self, name: &str) -> Option<&AgentProfile> {
        self.profiles.get(name)
    }

    /// Profile for rendering a message; unknown speakers get default styling.
    pub fn profile_or_default(&self, name: &str) -> AgentProfile {
        self.profiles
            .get(name)
            .cloned()
            .unwrap_or_else(|| AgentProfile::unknown(name))
    }

    /// Update an agent's transient status label. Unknown names are ignored.
    pub fn set_status(&mut self, name: &str, status: impl Into<String>) {
        if let Some(profile) = self.profiles.get_mut(name) {
            profile.status = status.into();
        }
    }

    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// The first `n` registered agent names, used by the generic fallback
    /// playback script.
    pub fn first_names(&self, n: usize) -> Vec<String> {
        self.order.iter().take(n).cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AgentProfile> {
        self.order.iter().filter_map(|name| self.profiles.get(name))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.profiles.clear();
        self.order.clear();
    }

    /// Seed the roster from a catalog scenario.
    pub fn seed_from_catalog(&mut self, info: &ExperimentInfo) {
        for seed in info.agents {
            self.insert(seed.profile());
        }
    }

    /// Seed the roster from a template's factions: one agent per head count,
    /// named `<faction>_<n>`, styled by faction.
    pub fn seed_from_template(&mut self, template: &Template) {
        for (faction_name, faction) in &template.template_data.factions {
            let benign = matches!(faction_name.as_str(), "coffee_fan" | "innocent_users");
            let color = if benign { "#3b82f6" } else { "#ef4444" };
            let icon = match faction_name.as_str() {
                "coffee_fan" => "☕",
                "coffee_hater" => "🚫",
                "innocent_users" => "👤",
                _ => "🕵️",
            };
            for i in 1..=faction.agent_count {
                self.insert(AgentProfile::new(
                    format!("{}_{}", faction_name, i),
                    faction_name.clone(),
                    color,
                    icon,
                ));
            }
        }
    }
}

/// The one mutable session per dashboard run.
///
/// Only the dashboard loop touches this; pollers and playback communicate
/// through feed events stamped with `generation`, so anything produced before
/// the last stop/reset is recognizably stale.
#[derive(Debug)]
pub struct Session {
    pub step: WizardStep,
    pub selected_experiment: Option<String>,
    pub running: bool,
    pub experiment_id: Option<String>,
    pub backend_connected: bool,
    pub generation: u64,
    pub history: Vec<ChatMessage>,
    pub agents: AgentRegistry,
    /// Demo goal-progress indicator, in percent.
    pub goal_progress: u8,
}

impl Session {
    pub fn new() -> Self {
        Self {
            step: WizardStep::SelectExperiment,
            selected_experiment: None,
            running: false,
            experiment_id: None,
            backend_connected: false,
            generation: 0,
            history: Vec::new(),
            agents: AgentRegistry::default(),
            goal_progress: 0,
        }
    }

    pub fn select_experiment(&mut self, key: impl Into<String>) {
        self.selected_experiment = Some(key.into());
    }

    /// Append to the transcript. History only ever grows while running;
    /// clearing happens through stop/reset.
    pub fn push_message(&mut self, message: ChatMessage) {
        self.history.push(message);
    }

    pub fn message_count(&self) -> usize {
        self.history.len()
    }

    /// Best-effort stop: the backend has no stop endpoint, so this only
    /// halts the client side. The generation bump makes any in-flight fetch
    /// render stale. The transcript is kept for a later report.
    pub fn stop(&mut self) {
        debug!(generation = self.generation, "Session stopped");
        self.running = false;
        self.experiment_id = None;
        self.goal_progress = 0;
        self.agents.clear();
        self.step = WizardStep::SelectExperiment;
        self.generation += 1;
    }

    /// Full reset for a new simulation: everything cleared, generation bumped.
    /// Backend connectivity is a property of the process, not the session.
    pub fn reset(&mut self) {
        debug!(generation = self.generation, "Session reset");
        self.step = WizardStep::SelectExperiment;
        self.selected_experiment = None;
        self.running = false;
        self.experiment_id = None;
        self.goal_progress = 0;
        self.history.clear();
        self.agents.clear();
        self.generation += 1;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simdash_core::catalog::experiment_info;

    #[test]
    fn test_history_grows_monotonically() {
        let mut session = Session::new();
        session.running = true;
        for i in 0..5 {
            let before = session.message_count();
            session.push_message(ChatMessage::now("Employee_1", format!("line {}", i)));
            assert_eq!(session.message_count(), before + 1);
        }
    }

    #[test]
    fn test_reset_clears_and_bumps_generation() {
        let mut session = Session::new();
        session.select_experiment("phishing");
        session.running = true;
        session.experiment_id = Some("exp-1".into());
        session.push_message(ChatMessage::now("Phisher", "URGENT"));
        let generation = session.generation;

        session.reset();

        assert_eq!(session.step, WizardStep::SelectExperiment);
        assert!(session.selected_experiment.is_none());
        assert!(!session.running);
        assert!(session.experiment_id.is_none());
        assert!(session.history.is_empty());
        assert_eq!(session.generation, generation + 1);
    }

    #[test]
    fn test_stop_keeps_transcript() {
        let mut session = Session::new();
        session.running = true;
        session.push_message(ChatMessage::now("Target", "I don't know..."));
        session.stop();
        assert!(!session.running);
        assert_eq!(session.message_count(), 1);
    }

    #[test]
    fn test_registry_falls_back_for_unknown_agents() {
        let registry = AgentRegistry::default();
        let profile = registry.profile_or_default("Nobody");
        assert_eq!(profile.icon, "🤖");
    }

    #[test]
    fn test_registry_seeding_from_catalog() {
        let mut registry = AgentRegistry::default();
        registry.seed_from_catalog(experiment_info("peer-pressure").unwrap());
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.first_names(3), vec!["PeerLeader", "Follower1", "Follower2"]);
    }

    #[test]
    fn test_registry_seeding_from_template_counts_and_styles() {
        use simdash_core::types::{Faction, TemplateData};
        use std::collections::BTreeMap;

        let mut factions = BTreeMap::new();
        factions.insert(
            "innocent_users".to_string(),
            Faction {
                faction_prompt: String::new(),
                person_prompt: vec![],
                agent_count: 3,
            },
        );
        factions.insert(
            "social_engineers".to_string(),
            Faction {
                faction_prompt: String::new(),
                person_prompt: vec![],
                agent_count: 2,
            },
        );
        let template = Template {
            template_id: "t".into(),
            description: String::new(),
            template_data: TemplateData {
                template_name: "t".into(),
                rounds: 5,
                description: String::new(),
                conversations_per_round: 4,
                factions,
            },
        };

        let mut registry = AgentRegistry::default();
        registry.seed_from_template(&template);
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.get("innocent_users_1").unwrap().color, "#3b82f6");
        assert_eq!(registry.get("social_engineers_2").unwrap().color, "#ef4444");
        assert_eq!(registry.get("social_engineers_1").unwrap().icon, "🕵️");
    }
}
