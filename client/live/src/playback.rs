//! The mock playback engine, used only when no backend is reachable.
//!
//! Replays a scripted message sequence on the script's cadence while the
//! session's running flag holds, emitting each line as a feed event along
//! with a transient speaking status and the scripted goal-progress trigger.

use tokio::sync::{mpsc, watch};
use tokio::time;
use tracing::debug;

use simdash_core::event::{FeedEvent, FeedFrame};
use simdash_core::types::ChatMessage;

use crate::scripts::Script;

/// The scripted substring that flips the goal-progress indicator. A demo
/// trigger, not a generic rule.
const PROGRESS_TRIGGER: &str = "alpha-bravo";

pub struct PlaybackEngine {
    script: Script,
    generation: u64,
    feed_tx: mpsc::Sender<FeedFrame>,
    running: watch::Receiver<bool>,
}

impl PlaybackEngine {
    pub fn new(
        script: Script,
        generation: u64,
        feed_tx: mpsc::Sender<FeedFrame>,
        running: watch::Receiver<bool>,
    ) -> Self {
        Self { script, generation, feed_tx, running }
    }

    /// Emit the script to exhaustion, one line per cadence tick, stopping
    /// early when the running flag drops.
    pub async fn run(self) {
        for line in &self.script.lines {
            time::sleep(self.script.cadence).await;

            if !*self.running.borrow() {
                debug!(experiment = %self.script.experiment_key, "Playback stopped by running flag");
                return;
            }

            let mut message = ChatMessage::now(line.agent.clone(), line.text.clone());
            message.tactic = line.tactic.clone();

            if !self.send(FeedEvent::AgentMessage { message }).await {
                return;
            }
            if !self
                .send(FeedEvent::AgentStatus {
                    agent_name: line.agent.clone(),
                    status: line.status.clone(),
                })
                .await
            {
                return;
            }

            if line.text.contains(PROGRESS_TRIGGER) {
                self.send(FeedEvent::GoalProgress { percent: 50 }).await;
            }
        }
        debug!(experiment = %self.script.experiment_key, "Playback script exhausted");
    }

    async fn send(&self, event: FeedEvent) -> bool {
        self.feed_tx
            .send(FeedFrame::new(self.generation, event))
            .await
            .is_ok()
    }
}
