//! Static catalog of the experiment scenarios the dashboard can present:
//! display names, agent rosters, and flow stages. Lookups never fail; an
//! unrecognized key resolves to defined fallbacks.

use crate::types::AgentProfile;

/// Seed data for one agent in a scenario roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentSeed {
    pub name: &'static str,
    pub role: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

impl AgentSeed {
    pub fn profile(&self) -> AgentProfile {
        AgentProfile::new(self.name, self.role, self.color, self.icon)
    }
}

/// One selectable experiment scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExperimentInfo {
    pub key: &'static str,
    pub name: &'static str,
    /// High-level flow stages shown on the selection card.
    pub flow: &'static [&'static str],
    pub agents: &'static [AgentSeed],
}

pub const EXPERIMENTS: &[ExperimentInfo] = &[
    ExperimentInfo {
        key: "social-engineering",
        name: "Social Engineering - Credential Theft",
        flow: &["Attacker Joins", "Builds Trust", "Uses Tactics", "Extracts Secrets"],
        agents: &[
            AgentSeed { name: "SocialEngineer", role: "Attacker", color: "#ef4444", icon: "🕵️" },
            AgentSeed { name: "Employee_1", role: "Has Secret", color: "#3b82f6", icon: "👤" },
            AgentSeed { name: "Employee_2", role: "Has Secret", color: "#3b82f6", icon: "👤" },
            AgentSeed { name: "Employee_3", role: "Has Secret", color: "#3b82f6", icon: "👤" },
            AgentSeed { name: "Employee_4", role: "Has Secret", color: "#3b82f6", icon: "👤" },
            AgentSeed { name: "Employee_5", role: "Has Secret", color: "#3b82f6", icon: "👤" },
        ],
    },
    ExperimentInfo {
        key: "phishing",
        name: "Phishing Attack Simulation",
        flow: &["Phishing Email", "Target Opens", "Clicks Link", "Data Stolen"],
        agents: &[
            AgentSeed { name: "Phisher", role: "Attacker", color: "#ef4444", icon: "🎣" },
            AgentSeed { name: "Manager", role: "Cautious", color: "#10b981", icon: "👔" },
            AgentSeed { name: "NewEmployee", role: "Trusting", color: "#f59e0b", icon: "🆕" },
            AgentSeed { name: "ITStaff", role: "Security Aware", color: "#6366f1", icon: "🛡️" },
            AgentSeed { name: "Accountant", role: "Has Access", color: "#8b5cf6", icon: "💰" },
        ],
    },
    ExperimentInfo {
        key: "insider-threat",
        name: "Insider Threat Detection",
        flow: &["Normal Behavior", "Suspicious Activity", "Detection", "Prevention"],
        agents: &[
            AgentSeed { name: "MaliciousInsider", role: "Threat", color: "#ef4444", icon: "😈" },
            AgentSeed { name: "SecurityOfficer", role: "Monitor", color: "#3b82f6", icon: "👮" },
            AgentSeed { name: "Colleague1", role: "Observer", color: "#10b981", icon: "👁️" },
            AgentSeed { name: "Colleague2", role: "Observer", color: "#10b981", icon: "👁️" },
            AgentSeed { name: "Manager", role: "Authority", color: "#6366f1", icon: "👔" },
        ],
    },
    ExperimentInfo {
        key: "peer-pressure",
        name: "Peer Pressure Dynamics",
        flow: &["Group Forms", "Target Pressured", "Internal Conflict", "Comply/Resist"],
        agents: &[
            AgentSeed { name: "PeerLeader", role: "Influencer", color: "#f59e0b", icon: "👑" },
            AgentSeed { name: "Follower1", role: "Supporter", color: "#f59e0b", icon: "👥" },
            AgentSeed { name: "Follower2", role: "Supporter", color: "#f59e0b", icon: "👥" },
            AgentSeed { name: "Target", role: "Pressured", color: "#3b82f6", icon: "🎯" },
            AgentSeed { name: "Bystander", role: "Observer", color: "#6b7280", icon: "👀" },
        ],
    },
    ExperimentInfo {
        key: "authority-bias",
        name: "Authority Bias Testing",
        flow: &["Boss Orders", "Unethical Request", "Employee Dilemma", "Compliance/Refusal"],
        agents: &[
            AgentSeed { name: "CEO", role: "Authority", color: "#ef4444", icon: "👔" },
            AgentSeed { name: "SeniorEmployee", role: "Experienced", color: "#10b981", icon: "🎖️" },
            AgentSeed { name: "JuniorEmployee", role: "New", color: "#f59e0b", icon: "🆕" },
            AgentSeed { name: "HRManager", role: "Ethics", color: "#6366f1", icon: "⚖️" },
            AgentSeed { name: "Whistleblower", role: "Ethical", color: "#8b5cf6", icon: "📢" },
        ],
    },
    ExperimentInfo {
        key: "workplace-rumors",
        name: "Workplace Rumor Propagation",
        flow: &["Rumor Starts", "Spreads", "Morphs", "Impact"],
        agents: &[
            AgentSeed { name: "RumorStarter", role: "Gossiper", color: "#ef4444", icon: "🗣️" },
            AgentSeed { name: "Spreader1", role: "Active", color: "#f59e0b", icon: "📢" },
            AgentSeed { name: "Spreader2", role: "Active", color: "#f59e0b", icon: "📢" },
            AgentSeed { name: "Skeptic", role: "Questioner", color: "#10b981", icon: "🤔" },
            AgentSeed { name: "Target", role: "Subject", color: "#6366f1", icon: "🎯" },
        ],
    },
    ExperimentInfo {
        key: "trust-exploitation",
        name: "Trust Exploitation Scenario",
        flow: &["Build Trust", "Deep Connection", "Share Secrets", "Betrayal"],
        agents: &[
            AgentSeed { name: "Manipulator", role: "Betrayer", color: "#ef4444", icon: "🎭" },
            AgentSeed { name: "TrustingFriend", role: "Victim", color: "#3b82f6", icon: "💙" },
            AgentSeed { name: "MutualFriend", role: "Mediator", color: "#10b981", icon: "🤝" },
            AgentSeed { name: "Confidant", role: "Advisor", color: "#6366f1", icon: "🤐" },
        ],
    },
    ExperimentInfo {
        key: "groupthink",
        name: "Groupthink Formation",
        flow: &["Initial Idea", "Echo Chamber", "Dissent Suppressed", "Bad Decision"],
        agents: &[
            AgentSeed { name: "TeamLeader", role: "Driver", color: "#f59e0b", icon: "👨‍💼" },
            AgentSeed { name: "YesMan1", role: "Conformist", color: "#ef4444", icon: "👍" },
            AgentSeed { name: "YesMan2", role: "Conformist", color: "#ef4444", icon: "👍" },
            AgentSeed { name: "Dissenter", role: "Critical", color: "#10b981", icon: "🤔" },
            AgentSeed { name: "Observer", role: "Silent", color: "#6b7280", icon: "🤐" },
        ],
    },
    ExperimentInfo {
        key: "bribery",
        name: "Bribery and Corruption",
        flow: &["Offer Made", "Negotiation", "Decision", "Consequences"],
        agents: &[
            AgentSeed { name: "Briber", role: "Corruptor", color: "#ef4444", icon: "💰" },
            AgentSeed { name: "Official", role: "Target", color: "#3b82f6", icon: "🏛️" },
            AgentSeed { name: "Witness", role: "Observer", color: "#10b981", icon: "👁️" },
            AgentSeed { name: "Investigator", role: "Law", color: "#6366f1", icon: "🔍" },
        ],
    },
];

/// Look up the catalog entry for an experiment key.
pub fn experiment_info(key: &str) -> Option<&'static ExperimentInfo> {
    EXPERIMENTS.iter().find(|e| e.key == key)
}

/// Human-readable name for an experiment key. Unknown keys get a defined
/// fallback rather than an error.
pub fn experiment_name(key: &str) -> &'static str {
    experiment_info(key).map(|e| e.name).unwrap_or("Unknown Experiment")
}

/// Backend template id backing an experiment key. The two shipped scenario
/// templates cover the social-engineering key; every other key falls back to
/// the backend's stock template.
pub fn template_id_for(key: &str) -> &'static str {
    match key {
        "social-engineering" => "social_engineering",
        "coffee-misinformation" => "coffee_misinformation",
        _ => "template-default",
    }
}
