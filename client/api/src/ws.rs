//! Client side of the backend's `/ws` simulation stream.
//!
//! The client sends one `start_simulation` config message on connect, then
//! consumes typed server pushes and forwards them onto the feed bus, where
//! they take the same render paths as polled and mock-played data.

use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use simdash_core::event::{FeedEvent, FeedFrame};
use simdash_core::types::{
    ChatMessage, CriticalMoment, Recommendation, Report, Takeaway, TakeawayKind,
};

/// How agents are paired up for conversations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CommPattern {
    #[default]
    RoundRobin,
    Broadcast,
    RandomPairs,
}

/// Agent memory toggles, spelled the way the backend expects them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MemoryOptions {
    pub shared_knowledge: bool,
    pub persistent_memory: bool,
    pub sleep_time: bool,
}

impl Default for MemoryOptions {
    fn default() -> Self {
        Self {
            shared_knowledge: false,
            persistent_memory: true,
            sleep_time: false,
        }
    }
}

/// Config sent in the opening `start_simulation` message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimulationConfig {
    pub experiment: String,
    pub agent_count: u32,
    pub llm_model: String,
    pub comm_pattern: CommPattern,
    pub memory_options: MemoryOptions,
}

/// Messages the client sends over the stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsClientMessage {
    StartSimulation {
        #[serde(flatten)]
        config: SimulationConfig,
    },
    StopSimulation,
}

/// Optional metadata attached to a streamed agent message.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MessageMetadata {
    #[serde(default)]
    pub tactic: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
}

/// A moderator report as the stream delivers it: every field optional, the
/// conversion below fills in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModeratorReportPayload {
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub takeaways: Vec<StreamedTakeaway>,
    #[serde(default)]
    pub critical_moments: Vec<StreamedMoment>,
    #[serde(default)]
    pub recommendations: Vec<StreamedRecommendation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StreamedTakeaway {
    #[serde(rename = "type", default)]
    pub kind: TakeawayKind,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StreamedMoment {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StreamedRecommendation {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Messages the server pushes over the stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsServerMessage {
    AgentMessage {
        agent_name: String,
        content: String,
        #[serde(default)]
        metadata: Option<MessageMetadata>,
    },
    SimulationCreated {
        #[serde(default)]
        agent_count: u32,
    },
    ModeratorReport {
        report: ModeratorReportPayload,
    },
    ReportComplete {
        report: ModeratorReportPayload,
    },
}

impl ModeratorReportPayload {
    /// Lift the loose stream payload into the dashboard's report model.
    pub fn into_report(self) -> Report {
        Report {
            outcome: self.outcome.unwrap_or_else(|| "📊 Analysis Complete".to_string()),
            summary: self
                .summary
                .unwrap_or_else(|| "Moderator has analyzed the conversation.".to_string()),
            takeaways: self
                .takeaways
                .into_iter()
                .map(|t| Takeaway {
                    kind: t.kind,
                    icon: t.kind.icon().to_string(),
                    title: t
                        .content
                        .split('.')
                        .next()
                        .filter(|s| !s.is_empty())
                        .unwrap_or("Insight")
                        .to_string(),
                    description: t.content,
                })
                .collect(),
            critical_moments: self
                .critical_moments
                .into_iter()
                .enumerate()
                .map(|(i, m)| CriticalMoment {
                    time: format!("Step {}", i + 1),
                    agent: "Moderator".to_string(),
                    description: m.description,
                })
                .collect(),
            recommendations: self
                .recommendations
                .into_iter()
                .map(|r| Recommendation {
                    title: r.title.unwrap_or_else(|| "Recommendation".to_string()),
                    text: r.text.unwrap_or_default(),
                })
                .collect(),
        }
    }
}

impl WsServerMessage {
    /// Map a stream push onto the feed event the dashboard loop consumes.
    pub fn into_feed_event(self) -> FeedEvent {
        match self {
            WsServerMessage::AgentMessage { agent_name, content, metadata } => {
                let mut message = ChatMessage::now(agent_name, content);
                message.tactic = metadata.and_then(|m| m.tactic);
                FeedEvent::AgentMessage { message }
            }
            WsServerMessage::SimulationCreated { agent_count } => {
                FeedEvent::SimulationCreated { agent_count }
            }
            WsServerMessage::ModeratorReport { report } | WsServerMessage::ReportComplete { report } => {
                FeedEvent::ModeratorReport { report: report.into_report() }
            }
        }
    }
}

/// Connect to the stream, send the opening config, and forward every server
/// push onto the feed bus until the connection closes or the bus is dropped.
pub async fn stream_simulation(
    ws_url: &str,
    config: SimulationConfig,
    feed_tx: mpsc::Sender<FeedFrame>,
    generation: u64,
) -> Result<()> {
    let (stream, _) = connect_async(ws_url)
        .await
        .with_context(|| format!("WebSocket connect to {} failed", ws_url))?;
    info!(url = %ws_url, experiment = %config.experiment, "Simulation stream connected");

    let (mut write, mut read) = stream.split();

    let opening = serde_json::to_string(&WsClientMessage::StartSimulation { config })
        .context("failed to encode start_simulation")?;
    write
        .send(Message::Text(opening))
        .await
        .context("failed to send start_simulation")?;

    while let Some(message) = read.next().await {
        match message.context("WebSocket read failed")? {
            Message::Text(text) => match serde_json::from_str::<WsServerMessage>(&text) {
                Ok(push) => {
                    let frame = FeedFrame::new(generation, push.into_feed_event());
                    if feed_tx.send(frame).await.is_err() {
                        debug!("Feed receiver dropped, closing stream");
                        break;
                    }
                }
                Err(e) => warn!(error = %e, "Ignoring unparseable stream message"),
            },
            Message::Ping(payload) => {
                write.send(Message::Pong(payload)).await.ok();
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_simulation_wire_shape() {
        let msg = WsClientMessage::StartSimulation {
            config: SimulationConfig {
                experiment: "social-engineering".into(),
                agent_count: 6,
                llm_model: "gpt-4o-mini".into(),
                comm_pattern: CommPattern::RoundRobin,
                memory_options: MemoryOptions::default(),
            },
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"start_simulation\""));
        assert!(json.contains("\"experiment\":\"social-engineering\""));
        assert!(json.contains("\"sharedKnowledge\":false"));
        assert!(json.contains("\"comm_pattern\":\"round_robin\""));
    }

    #[test]
    fn test_server_message_dispatch() {
        let push: WsServerMessage = serde_json::from_str(
            "{\"type\":\"agent_message\",\"agent_name\":\"Phisher\",\"content\":\"URGENT\",\"metadata\":{\"tactic\":\"Creating Urgency\"}}",
        )
        .unwrap();
        match push.into_feed_event() {
            FeedEvent::AgentMessage { message } => {
                assert_eq!(message.agent_name, "Phisher");
                assert_eq!(message.tactic.as_deref(), Some("Creating Urgency"));
            }
            other => panic!("wrong event: {:?}", other),
        }
    }

    #[test]
    fn test_moderator_payload_defaults() {
        let report = ModeratorReportPayload::default().into_report();
        assert_eq!(report.outcome, "📊 Analysis Complete");
        assert!(report.takeaways.is_empty());
    }

    #[test]
    fn test_report_complete_maps_like_moderator_report() {
        let push: WsServerMessage = serde_json::from_str(
            "{\"type\":\"report_complete\",\"report\":{\"summary\":\"done\",\"takeaways\":[{\"type\":\"negative\",\"content\":\"Credentials leaked. Badly.\"}]}}",
        )
        .unwrap();
        match push.into_feed_event() {
            FeedEvent::ModeratorReport { report } => {
                assert_eq!(report.summary, "done");
                assert_eq!(report.takeaways[0].title, "Credentials leaked");
                assert_eq!(report.takeaways[0].icon, "❌");
            }
            other => panic!("wrong event: {:?}", other),
        }
    }
}
