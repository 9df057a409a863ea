use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Visual identity and role of one simulated agent as shown in the agent grid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentProfile {
    pub name: String,
    /// Faction or role label ("Attacker", "Has Secret", "coffee_fan", ...).
    pub role: String,
    /// Display color as a CSS-style hex string.
    pub color: String,
    pub icon: String,
    /// Transient status label ("Ready", "Speaking", "Active").
    #[serde(default)]
    pub status: String,
}

impl AgentProfile {
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        color: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            color: color.into(),
            icon: icon.into(),
            status: "Ready".to_string(),
        }
    }

    /// Fallback profile for messages that reference an agent the session
    /// never registered.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: String::new(),
            color: "#666".to_string(),
            icon: "🤖".to_string(),
            status: String::new(),
        }
    }
}

/// One line of agent chatter in the session transcript.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub agent_name: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Manipulation-tactic tag, when the speaker used one ("Creating Urgency").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tactic: Option<String>,
}

impl ChatMessage {
    pub fn now(agent_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            content: content.into(),
            timestamp: Utc::now(),
            tactic: None,
        }
    }

    pub fn with_tactic(mut self, tactic: impl Into<String>) -> Self {
        self.tactic = Some(tactic.into());
        self
    }
}

/// A single pairwise exchange inside one simulated day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exchange {
    pub agent_1: String,
    pub agent_2: String,
    pub sequence_no: u32,
    pub text: String,
}

/// Backend conversations grouped by simulated day. Each poll returns the full
/// set; a snapshot always replaces the previous render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayConversations {
    pub day: u32,
    pub conversations: Vec<Exchange>,
}

/// Lifecycle status of a backend experiment. Anything the backend reports
/// that we do not recognize maps to `Unknown` rather than failing the poll.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExperimentStatus {
    Pending,
    Running,
    Completed,
    Failed,
    #[serde(other)]
    #[default]
    Unknown,
}

impl ExperimentStatus {
    /// The backend keeps working through both `pending` and `running`.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::Running)
    }
}

impl fmt::Display for ExperimentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// One row of the experiments board.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExperimentRecord {
    pub experiment_id: String,
    pub template_id: String,
    #[serde(default)]
    pub template_description: String,
    pub status: ExperimentStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A named group of agents sharing a prompt and a person-prompt pool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Faction {
    pub faction_prompt: String,
    pub person_prompt: Vec<String>,
    pub agent_count: u32,
}

/// The editable body of a template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateData {
    pub template_name: String,
    pub rounds: u32,
    pub description: String,
    pub conversations_per_round: u32,
    /// BTreeMap keeps faction ordering stable across render and compare.
    pub factions: BTreeMap<String, Faction>,
}

/// A reusable experiment configuration, shipped built-in or fetched from the
/// backend. Built-in templates are never mutated; edits derive a copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Template {
    pub template_id: String,
    pub description: String,
    pub template_data: TemplateData,
}

/// Sentiment of a single report takeaway.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TakeawayKind {
    Positive,
    Negative,
    #[serde(other)]
    #[default]
    Neutral,
}

impl TakeawayKind {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Positive => "✅",
            Self::Negative => "❌",
            Self::Neutral => "📊",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Takeaway {
    pub kind: TakeawayKind,
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CriticalMoment {
    pub time: String,
    pub agent: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendation {
    pub title: String,
    pub text: String,
}

/// Moderator analysis for a completed session, either synthesized locally or
/// parsed from the backend's free-text report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Report {
    pub outcome: String,
    pub summary: String,
    pub takeaways: Vec<Takeaway>,
    pub critical_moments: Vec<CriticalMoment>,
    pub recommendations: Vec<Recommendation>,
}

/// Severity of a user-facing notification toast.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotifyLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub level: NotifyLevel,
    pub text: String,
}

impl Notification {
    pub fn new(level: NotifyLevel, text: impl Into<String>) -> Self {
        Self { level, text: text.into() }
    }
}

/// Payload of the backend `/health` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HealthSnapshot {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub templates_count: Option<u64>,
    #[serde(default)]
    pub total_experiments: Option<u64>,
    #[serde(default)]
    pub running_experiments: Option<u64>,
}

impl HealthSnapshot {
    /// The backend counts as reachable when it self-reports healthy or at
    /// least confirms its database connection.
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy" || self.database.as_deref() == Some("connected")
    }
}
