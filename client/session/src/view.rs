//! Named view regions and the deterministic render functions that populate
//! them. Rendering always fully replaces a region's content; nothing merges.

use simdash_core::types::{ChatMessage, DayConversations, Report};

use crate::notify::{Banner, NotificationCenter};
use crate::state::{AgentRegistry, Session};

/// One line item in the conversation panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEntry {
    /// "Day N" separator with the day's conversation count.
    DayHeader { day: u32, conversation_count: usize },
    /// A backend pairwise exchange.
    Exchange {
        agent_1: String,
        agent_1_icon: String,
        agent_2: String,
        agent_2_icon: String,
        sequence_no: u32,
        day: u32,
        text: String,
    },
    /// A single-speaker chat line (mock playback or WebSocket push).
    Chat {
        agent_name: String,
        icon: String,
        color: String,
        time: String,
        content: String,
        tactic: Option<String>,
    },
}

/// The conversation panel region. Poll failures replace the display but not
/// the session's history; retrying re-renders from fresh data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConversationPanel {
    /// No data yet: "Waiting for agents to start conversing...".
    #[default]
    Waiting,
    Entries(Vec<PanelEntry>),
    /// Inline error with a manual retry affordance.
    Error { message: String },
}

impl ConversationPanel {
    /// Number of rendered message entries (day separators excluded).
    pub fn rendered_message_count(&self) -> usize {
        match self {
            Self::Entries(entries) => entries
                .iter()
                .filter(|e| !matches!(e, PanelEntry::DayHeader { .. }))
                .count(),
            _ => 0,
        }
    }
}

/// The stats strip above the conversation panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsStrip {
    pub message_count: usize,
    pub active_agents: usize,
    pub trust_level: u8,
    pub goal_progress: u8,
}

/// The four report output regions, as display lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportView {
    pub summary: Vec<String>,
    pub takeaways: Vec<String>,
    pub critical_moments: Vec<String>,
    pub recommendations: Vec<String>,
}

impl ReportView {
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
            && self.takeaways.is_empty()
            && self.critical_moments.is_empty()
            && self.recommendations.is_empty()
    }
}

/// Context lines for the executive summary header.
#[derive(Debug, Clone, Default)]
pub struct ReportContext {
    pub experiment_name: String,
    pub experiment_id: Option<String>,
    pub message_count: usize,
}

/// Root of everything the terminal renders.
#[derive(Debug, Default)]
pub struct ViewState {
    pub banner: Banner,
    pub notifications: NotificationCenter,
    pub conversation_panel: ConversationPanel,
    pub stats: StatsStrip,
    pub report: ReportView,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the conversation panel with an authoritative day-grouped
    /// snapshot. Calling this twice with the same payload renders the same
    /// entry count; nothing accumulates.
    pub fn render_conversations(&mut self, days: &[DayConversations], agents: &AgentRegistry) {
        if days.is_empty() {
            self.conversation_panel = ConversationPanel::Waiting;
            return;
        }

        let mut entries = Vec::new();
        for day_data in days {
            entries.push(PanelEntry::DayHeader {
                day: day_data.day,
                conversation_count: day_data.conversations.len(),
            });
            for exchange in &day_data.conversations {
                let a = agents.profile_or_default(&exchange.agent_1);
                let b = agents.profile_or_default(&exchange.agent_2);
                entries.push(PanelEntry::Exchange {
                    agent_1: exchange.agent_1.clone(),
                    agent_1_icon: a.icon,
                    agent_2: exchange.agent_2.clone(),
                    agent_2_icon: b.icon,
                    sequence_no: exchange.sequence_no,
                    day: day_data.day,
                    text: exchange.text.clone(),
                });
            }
        }
        self.conversation_panel = ConversationPanel::Entries(entries);
    }

    /// Replace the panel with an inline error. Prior data stays wherever it
    /// came from; only the display changes.
    pub fn render_feed_error(&mut self, message: impl Into<String>) {
        self.conversation_panel = ConversationPanel::Error { message: message.into() };
    }

    /// Append one chat line (mock playback / WebSocket). An error or waiting
    /// panel flips back to entries.
    pub fn push_chat(&mut self, message: &ChatMessage, agents: &AgentRegistry) {
        let profile = agents.profile_or_default(&message.agent_name);
        let entry = PanelEntry::Chat {
            agent_name: message.agent_name.clone(),
            icon: profile.icon,
            color: profile.color,
            time: message.timestamp.format("%H:%M:%S").to_string(),
            content: message.content.clone(),
            tactic: message.tactic.clone(),
        };
        match &mut self.conversation_panel {
            ConversationPanel::Entries(entries) => entries.push(entry),
            panel => *panel = ConversationPanel::Entries(vec![entry]),
        }
    }

    /// Populate all four report regions from a report. Full replacement.
    pub fn render_report(&mut self, report: &Report, context: &ReportContext) {
        let mut summary = vec![format!("Experiment Type: {}", context.experiment_name)];
        if let Some(id) = &context.experiment_id {
            summary.push(format!("Experiment ID: {}", id));
        }
        summary.push(format!("Total Interactions: {} messages", context.message_count));
        summary.push(format!("Outcome: {}", report.outcome));
        summary.push(report.summary.clone());

        let takeaways = report
            .takeaways
            .iter()
            .map(|t| format!("{} {}: {}", t.icon, t.title, t.description))
            .collect();

        let critical_moments = report
            .critical_moments
            .iter()
            .enumerate()
            .map(|(i, m)| format!("{}. [{}] {}: {}", i + 1, m.time, m.agent, m.description))
            .collect();

        let recommendations = report
            .recommendations
            .iter()
            .map(|r| format!("💡 {}: {}", r.title, r.text))
            .collect();

        self.report = ReportView { summary, takeaways, critical_moments, recommendations };
    }

    /// Refresh the stats strip from session state.
    pub fn update_stats(&mut self, session: &Session) {
        self.stats = StatsStrip {
            message_count: session.message_count(),
            active_agents: session.agents.len(),
            trust_level: (session.message_count() * 10).min(100) as u8,
            goal_progress: session.goal_progress,
        };
    }
}
