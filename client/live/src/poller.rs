//! The live conversation feed poller.
//!
//! Every cycle fetches the full conversation set for the active experiment
//! and emits it as an authoritative snapshot; result data is fetched
//! best-effort on the same cycle. A failed cycle emits an inline feed error
//! and leaves prior state untouched.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time;
use tracing::{debug, warn};

use simdash_core::event::{FeedEvent, FeedFrame};
use simdash_core::traits::ExperimentGateway;

/// Fixed conversation poll period.
pub const CONVERSATION_POLL_PERIOD: Duration = Duration::from_secs(3);

pub struct FeedPoller {
    gateway: Arc<dyn ExperimentGateway>,
    experiment_id: String,
    generation: u64,
    feed_tx: mpsc::Sender<FeedFrame>,
    period: Duration,
}

impl FeedPoller {
    pub fn new(
        gateway: Arc<dyn ExperimentGateway>,
        experiment_id: impl Into<String>,
        generation: u64,
        feed_tx: mpsc::Sender<FeedFrame>,
    ) -> Self {
        Self {
            gateway,
            experiment_id: experiment_id.into(),
            generation,
            feed_tx,
            period: CONVERSATION_POLL_PERIOD,
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Poll until the feed receiver goes away or the task is aborted.
    /// The first cycle runs immediately so the panel fills without waiting a
    /// full period.
    pub async fn run(self) {
        let mut ticker = time::interval(self.period);
        loop {
            ticker.tick().await;
            if !self.cycle().await {
                break;
            }
        }
        debug!(experiment_id = %self.experiment_id, "Conversation poller stopped");
    }

    /// One poll cycle. Returns false once the receiver is gone.
    async fn cycle(&self) -> bool {
        match self.gateway.conversations(&self.experiment_id).await {
            Ok(days) => {
                let sent = self
                    .send(FeedEvent::ConversationSnapshot { days, is_final: false })
                    .await;
                if !sent {
                    return false;
                }
            }
            Err(e) => {
                warn!(experiment_id = %self.experiment_id, error = %e, "Conversation poll failed");
                return self.send(FeedEvent::FeedError { error: e.to_string() }).await;
            }
        }

        // Result data is best-effort; absence just means the experiment has
        // not produced a report yet.
        match self.gateway.result(&self.experiment_id).await {
            Ok(Some(raw_report)) => self.send(FeedEvent::ResultAvailable { raw_report }).await,
            Ok(None) => true,
            Err(e) => {
                debug!(error = %e, "Result fetch failed, will retry next cycle");
                true
            }
        }
    }

    /// Run exactly one cycle. Backs the manual retry action on the inline
    /// error panel.
    pub async fn poll_once(
        gateway: Arc<dyn ExperimentGateway>,
        experiment_id: &str,
        generation: u64,
        feed_tx: mpsc::Sender<FeedFrame>,
    ) {
        let poller = FeedPoller::new(gateway, experiment_id, generation, feed_tx);
        poller.cycle().await;
    }

    async fn send(&self, event: FeedEvent) -> bool {
        self.feed_tx
            .send(FeedFrame::new(self.generation, event))
            .await
            .is_ok()
    }
}
