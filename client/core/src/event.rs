use serde::{Deserialize, Serialize};

use crate::types::{ChatMessage, DayConversations, ExperimentStatus, NotifyLevel, Report};

/// Events emitted by the pollers, the mock playback engine, and the
/// WebSocket reader toward the dashboard loop, which owns all session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedEvent {
    /// One agent spoke (mock playback or WebSocket push). Appends to history.
    AgentMessage { message: ChatMessage },
    /// Authoritative day-grouped conversation snapshot from a poll cycle.
    /// Replaces the whole conversation panel; `is_final` marks the one
    /// post-completion fetch.
    ConversationSnapshot {
        days: Vec<DayConversations>,
        is_final: bool,
    },
    /// A conversation poll cycle failed; the panel shows an error with a
    /// manual retry, prior data stays in memory.
    FeedError { error: String },
    /// The experiment status poller observed a status.
    StatusChanged { status: ExperimentStatus },
    /// The backend produced a raw moderator report.
    ResultAvailable { raw_report: String },
    /// A structured moderator report arrived over the WebSocket.
    ModeratorReport { report: Report },
    /// The backend acknowledged simulation creation.
    SimulationCreated { agent_count: u32 },
    /// Transient per-agent status label update ("Speaking", "Active").
    AgentStatus { agent_name: String, status: String },
    /// Scripted goal-progress update, in percent.
    GoalProgress { percent: u8 },
    /// User-facing notification toast.
    Notice { level: NotifyLevel, text: String },
}

/// A feed event stamped with the session generation it was produced under.
/// The apply loop drops frames whose generation no longer matches, so an
/// in-flight fetch finishing after a reset cannot render into the new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedFrame {
    pub generation: u64,
    pub event: FeedEvent,
}

impl FeedFrame {
    pub fn new(generation: u64, event: FeedEvent) -> Self {
        Self { generation, event }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_event_serialization_roundtrip() {
        let frame = FeedFrame::new(
            3,
            FeedEvent::AgentMessage {
                message: ChatMessage::now("Employee_3", "I guess... alpha-bravo..."),
            },
        );
        let json = serde_json::to_string(&frame).unwrap();
        let back: FeedFrame = serde_json::from_str(&json).unwrap();
        assert_eq!(back.generation, 3);
        match back.event {
            FeedEvent::AgentMessage { message } => {
                assert_eq!(message.agent_name, "Employee_3");
            }
            other => panic!("wrong variant: {:?}", other),
        }
    }

    #[test]
    fn test_feed_event_wire_tag() {
        let frame = FeedFrame::new(0, FeedEvent::GoalProgress { percent: 50 });
        let json = serde_json::to_string(&frame.event).unwrap();
        assert!(json.contains("\"type\":\"goal_progress\""));
    }
}
