//! The experiment status poller.
//!
//! Runs at a 2-second period while the experiment is active. On completion
//! it performs one final conversations-and-result fetch flagged final; on
//! failure it signals and stops; an unrecognized status is reported as
//! unknown and polling stops.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time;
use tracing::{debug, warn};

use simdash_core::event::{FeedEvent, FeedFrame};
use simdash_core::traits::ExperimentGateway;
use simdash_core::types::{ExperimentStatus, NotifyLevel};

/// Fixed status poll period.
pub const STATUS_POLL_PERIOD: Duration = Duration::from_secs(2);

pub struct StatusPoller {
    gateway: Arc<dyn ExperimentGateway>,
    experiment_id: String,
    generation: u64,
    feed_tx: mpsc::Sender<FeedFrame>,
    period: Duration,
}

impl StatusPoller {
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
            period: STATUS_POLL_PERIOD,
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub async fn run(self) {
        let mut ticker = time::interval(self.period);
        loop {
            ticker.tick().await;
            match self.gateway.experiment_status(&self.experiment_id).await {
                Ok(status) if status.is_active() => {
                    if !self.send(FeedEvent::StatusChanged { status }).await {
                        return;
                    }
                }
                Ok(ExperimentStatus::Completed) => {
                    self.send(FeedEvent::StatusChanged { status: ExperimentStatus::Completed })
                        .await;
                    self.final_fetch().await;
                    break;
                }
                Ok(ExperimentStatus::Failed) => {
                    self.send(FeedEvent::StatusChanged { status: ExperimentStatus::Failed })
                        .await;
                    self.send(FeedEvent::Notice {
                        level: NotifyLevel::Error,
                        text: "Simulation failed".to_string(),
                    })
                    .await;
                    break;
                }
                Ok(status) => {
                    // Anything unrecognized is reported as-is and ends polling.
                    self.send(FeedEvent::StatusChanged { status }).await;
                    break;
                }
                Err(e) => {
                    warn!(experiment_id = %self.experiment_id, error = %e, "Status poll failed");
                    self.send(FeedEvent::Notice {
                        level: NotifyLevel::Warning,
                        text: format!("Status poll failed: {}", e),
                    })
                    .await;
                    break;
                }
            }
        }
        debug!(experiment_id = %self.experiment_id, "Status poller stopped");
    }

    /// The one extra fetch after completion, flagged final so the dashboard
    /// can finish up and notify.
    async fn final_fetch(&self) {
        match self.gateway.conversations(&self.experiment_id).await {
            Ok(days) => {
                self.send(FeedEvent::ConversationSnapshot { days, is_final: true })
                    .await;
            }
            Err(e) => {
                warn!(error = %e, "Final conversation fetch failed");
            }
        }
        match self.gateway.result(&self.experiment_id).await {
            Ok(Some(raw_report)) => {
                self.send(FeedEvent::ResultAvailable { raw_report }).await;
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Final result fetch failed"),
        }
    }

    async fn send(&self, event: FeedEvent) -> bool {
        self.feed_tx
            .send(FeedFrame::new(self.generation, event))
            .await
            .is_ok()
    }
}
