//! The dashboard loop's state and event handling.
//!
//! One instance owns the session, the view, the template editor, and the
//! timer registry. Keyboard actions mutate it directly; pollers, playback,
//! and the WebSocket reader only reach it through generation-stamped feed
//! frames, applied here on the single event-loop task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{debug, error, trace, warn};

use logging::{EventLogger, SessionEvent};
use simdash_api::ws::{stream_simulation, MemoryOptions, SimulationConfig};
use simdash_api::{ApiClient, RunExperimentRequest};
use simdash_core::catalog::{experiment_info, experiment_name, EXPERIMENTS};
use simdash_core::error::DashError;
use simdash_core::event::{FeedEvent, FeedFrame};
use simdash_core::traits::{ExperimentGateway, TemplateStore};
use simdash_core::types::{ExperimentStatus, Template};
use simdash_live::poller::FeedPoller;
use simdash_live::status::StatusPoller;
use simdash_live::{PlaybackEngine, Script, TimerKind, TimerRegistry};
use simdash_report::{synthesize, ReportSource};
use simdash_session::notify::apply_health;
use simdash_session::state::Session;
use simdash_session::view::{ReportContext, ViewState};
use simdash_session::wizard::{self, WizardStep};
use simdash_templates::{builtin_for_experiment, TemplateEditor};
use tui::Action;

use crate::config::Config;

/// Transient agent status labels revert to this after two seconds.
const AGENT_STATUS_IDLE: &str = "Active";
const STATUS_REVERT_DELAY: Duration = Duration::from_secs(2);

pub struct Dashboard {
    pub session: Session,
    pub view: ViewState,
    pub editor: Option<TemplateEditor>,
    pub picker_index: usize,
    pub should_quit: bool,
    api: Arc<ApiClient>,
    feed_tx: mpsc::Sender<FeedFrame>,
    timers: TimerRegistry,
    playback_running: Option<watch::Sender<bool>>,
    latest_raw_report: Option<String>,
    config: Config,
}

impl Dashboard {
    pub fn new(api: Arc<ApiClient>, feed_tx: mpsc::Sender<FeedFrame>, config: Config) -> Self {
        Self {
            session: Session::new(),
            view: ViewState::new(),
            editor: None,
            picker_index: 0,
            should_quit: false,
            api,
            feed_tx,
            timers: TimerRegistry::new(),
            playback_running: None,
            latest_raw_report: None,
            config,
        }
    }

    /// Probe backend connectivity and set the banner accordingly.
    pub async fn probe_backend(&mut self) {
        match self.api.check_health().await {
            Ok(health) => apply_health(&mut self.session, &mut self.view, Some(&health)),
            Err(e) => {
                debug!(error = %e, "Health probe failed");
                apply_health(&mut self.session, &mut self.view, None);
            }
        }
    }

    pub async fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.halt_producers();
                self.should_quit = true;
            }
            Action::PickerPrev => {
                self.picker_index = self.picker_index.saturating_sub(1);
            }
            Action::PickerNext => {
                self.picker_index = (self.picker_index + 1).min(EXPERIMENTS.len() - 1);
            }
            Action::Select => {
                if self.session.step == WizardStep::SelectExperiment {
                    let key = EXPERIMENTS[self.picker_index].key;
                    self.session.select_experiment(key);
                    self.view.notifications.info(format!("Selected: {}", experiment_name(key)));
                }
            }
            Action::Next => self.next_step(),
            Action::Back => {
                wizard::retreat(&mut self.session);
            }
            Action::CheckChanges => self.check_template_changes().await,
            Action::ResetTemplate => {
                if let Some(editor) = &mut self.editor {
                    editor.reset();
                    self.view.notifications.info("Template reset to default values");
                }
            }
            Action::RoundsUp => {
                if let Some(editor) = &mut self.editor {
                    editor.working.rounds = (editor.working.rounds + 1).min(10);
                }
            }
            Action::RoundsDown => {
                if let Some(editor) = &mut self.editor {
                    editor.working.rounds = editor.working.rounds.saturating_sub(1).max(1);
                }
            }
            Action::Start => self.start_simulation().await,
            Action::Stop => self.stop_simulation(),
            Action::GenerateReport => self.generate_report().await,
            Action::Retry => self.retry_feed(),
            Action::NewSimulation => self.new_simulation(),
        }
    }

    fn next_step(&mut self) {
        let was = self.session.step;
        match wizard::advance(&mut self.session) {
            Ok(step) => {
                if was == WizardStep::SelectExperiment && step == WizardStep::ConfigureTemplate {
                    let key = self.session.selected_experiment.as_deref().unwrap_or_default();
                    self.editor = Some(TemplateEditor::load(builtin_for_experiment(key)));
                }
            }
            Err(DashError::NoSelection) => {
                self.view.notifications.error("Please select an experiment first!");
            }
            Err(e) => {
                self.view.notifications.error(e.to_string());
            }
        }
    }

    async fn check_template_changes(&mut self) {
        if self.session.step != WizardStep::ConfigureTemplate {
            return;
        }
        let Some(editor) = &mut self.editor else {
            return;
        };
        if !self.session.backend_connected {
            // Edits still apply to the local run config; only the backend
            // submission is skipped.
            if editor.detect_changes().is_some() {
                self.view.notifications.warning("Backend offline - edits apply to this run only");
            } else {
                self.view.notifications.info("No changes detected. Using original template.");
            }
            return;
        }
        match editor.commit(self.api.as_ref()).await {
            Ok(simdash_templates::ChangeOutcome::Unchanged) => {
                self.view.notifications.info("No changes detected. Using original template.");
            }
            Ok(simdash_templates::ChangeOutcome::Modified { template_id }) => {
                self.view
                    .notifications
                    .success(format!("Modified template created: {}", template_id));
            }
            Err(e) => {
                error!(error = %e, "Template create failed");
                self.view.notifications.error("Failed to create modified template");
            }
        }
    }

    async fn start_simulation(&mut self) {
        if self.session.step != WizardStep::ReviewSettings {
            return;
        }
        if wizard::start(&mut self.session).is_err() {
            self.view.notifications.error("Please select an experiment first!");
            return;
        }

        let key = self
            .session
            .selected_experiment
            .clone()
            .unwrap_or_default();
        let editor = self
            .editor
            .get_or_insert_with(|| TemplateEditor::load(builtin_for_experiment(&key)));

        // Agent grid: template factions when the backend drives the run,
        // the catalog roster for the offline demo.
        if self.session.backend_connected {
            let working = Template {
                template_id: editor.active_template_id().to_string(),
                description: editor.working.description.clone(),
                template_data: editor.working.clone(),
            };
            self.session.agents.seed_from_template(&working);
            self.start_backend_run().await;
        } else {
            if let Some(info) = experiment_info(&key) {
                self.session.agents.seed_from_catalog(info);
            }
            self.start_mock_playback(&key);
        }
        self.view.update_stats(&self.session);
    }

    async fn start_backend_run(&mut self) {
        let Some(editor) = &self.editor else {
            return;
        };
        let active_template_id = editor.active_template_id().to_string();

        // Make sure the base template exists server-side. The backend 409s
        // when it is already there, which is fine.
        if active_template_id == editor.original().template_id {
            if let Err(e) = self.api.create_template(editor.original()).await {
                debug!(error = %e, "Base template create skipped");
            }
        }

        let request = RunExperimentRequest {
            template_id: active_template_id,
            rounds: Some(editor.working.rounds),
            conversations_per_round: Some(editor.working.conversations_per_round),
        };
        match self.api.run_experiment(&request).await {
            Ok(response) => {
                let experiment_id = response.experiment_id;
                self.session.experiment_id = Some(experiment_id.clone());
                self.view
                    .notifications
                    .success(format!("Experiment started: {}", experiment_id));

                let generation = self.session.generation;
                let gateway: Arc<dyn ExperimentGateway> = self.api.clone();

                self.timers.spawn(
                    TimerKind::ConversationPoll,
                    FeedPoller::new(
                        gateway.clone(),
                        experiment_id.clone(),
                        generation,
                        self.feed_tx.clone(),
                    )
                    .run(),
                );
                self.timers.spawn(
                    TimerKind::StatusPoll,
                    StatusPoller::new(gateway, experiment_id, generation, self.feed_tx.clone())
                        .run(),
                );
                self.start_stream(generation);
            }
            Err(e) => {
                error!(error = %e, "Failed to start backend simulation");
                self.view.notifications.error("Failed to start simulation");
            }
        }
    }

    /// Best-effort live event stream; polling carries the session when the
    /// backend has no WebSocket endpoint.
    fn start_stream(&mut self, generation: u64) {
        let Some(key) = self.session.selected_experiment.clone() else {
            return;
        };
        let config = SimulationConfig {
            experiment: key,
            agent_count: self.session.agents.len() as u32,
            llm_model: self.config.llm_model.clone(),
            comm_pattern: Default::default(),
            memory_options: MemoryOptions::default(),
        };
        let ws_url = self.config.ws_url.clone();
        let feed_tx = self.feed_tx.clone();
        self.timers.spawn(TimerKind::Stream, async move {
            if let Err(e) = stream_simulation(&ws_url, config, feed_tx, generation).await {
                debug!(error = %e, "Simulation stream unavailable");
            }
        });
    }

    fn start_mock_playback(&mut self, key: &str) {
        let script = Script::for_experiment(key, &self.session.agents.first_names(3));
        if script.is_empty() {
            self.view.notifications.warning("No demo script available for this experiment");
            return;
        }
        let (running_tx, running_rx) = watch::channel(true);
        self.playback_running = Some(running_tx);
        let engine = PlaybackEngine::new(
            script,
            self.session.generation,
            self.feed_tx.clone(),
            running_rx,
        );
        self.timers.spawn(TimerKind::Playback, engine.run());
        self.view.notifications.info("Backend offline - replaying scripted demo");
    }

    fn stop_simulation(&mut self) {
        if self.session.step != WizardStep::RunningSimulation {
            return;
        }
        if self.session.backend_connected && self.session.experiment_id.is_some() {
            // No stop endpoint exists; the experiment keeps running
            // server-side and only client polling stops.
            self.view
                .notifications
                .info("Simulation stopped (experiment continues in background)");
        }
        self.halt_producers();
        self.session.stop();
        self.view.conversation_panel = Default::default();
        self.view.update_stats(&self.session);
    }

    async fn generate_report(&mut self) {
        if self.session.step != WizardStep::RunningSimulation {
            return;
        }
        wizard::generate_report(&mut self.session);

        // Leaving the running step ends polling and playback; the stream
        // stays up so a late report_complete push can still land.
        self.timers.cancel(TimerKind::ConversationPoll);
        self.timers.cancel(TimerKind::StatusPoll);
        self.timers.cancel(TimerKind::Playback);
        if let Some(running) = self.playback_running.take() {
            let _ = running.send(false);
        }

        let key = self.session.selected_experiment.clone().unwrap_or_default();
        let backend_attempted =
            self.session.backend_connected && self.session.experiment_id.is_some();

        let mut raw = self.latest_raw_report.clone();
        if raw.is_none() {
            if let Some(experiment_id) = self.session.experiment_id.clone() {
                if self.session.backend_connected {
                    self.view.notifications.info("Generating AI analysis report...");
                    match self.api.result(&experiment_id).await {
                        Ok(report) => raw = report,
                        Err(e) => warn!(error = %e, "Result fetch for report failed"),
                    }
                }
            }
        }

        let (report, source) = synthesize(raw.as_deref(), &key, &self.session.history);
        match source {
            ReportSource::Backend => {
                self.view.notifications.success("Report generated successfully!");
            }
            ReportSource::LocalFallback if backend_attempted => {
                self.view
                    .notifications
                    .warning("Report generation failed - using local analysis");
            }
            ReportSource::LocalFallback => {}
        }

        let context = ReportContext {
            experiment_name: experiment_name(&key).to_string(),
            experiment_id: self.session.experiment_id.clone(),
            message_count: self.session.message_count(),
        };
        self.view.render_report(&report, &context);
    }

    /// Manual retry from the inline error panel: one immediate poll cycle.
    fn retry_feed(&mut self) {
        if self.session.step != WizardStep::RunningSimulation {
            return;
        }
        let Some(experiment_id) = self.session.experiment_id.clone() else {
            return;
        };
        let gateway: Arc<dyn ExperimentGateway> = self.api.clone();
        let feed_tx = self.feed_tx.clone();
        let generation = self.session.generation;
        tokio::spawn(async move {
            FeedPoller::poll_once(gateway, &experiment_id, generation, feed_tx).await;
        });
    }

    fn new_simulation(&mut self) {
        self.halt_producers();
        self.session.reset();
        self.editor = None;
        self.picker_index = 0;
        self.latest_raw_report = None;

        let banner = self.view.banner;
        self.view = ViewState::new();
        self.view.banner = banner;
    }

    fn halt_producers(&mut self) {
        if let Some(running) = self.playback_running.take() {
            let _ = running.send(false);
        }
        self.timers.cancel_all();
    }

    /// Apply one feed frame. Frames from a stale generation are dropped, so
    /// an in-flight fetch finishing after stop/reset cannot touch the view.
    pub fn apply_frame(&mut self, frame: FeedFrame) {
        if frame.generation != self.session.generation {
            trace!(frame_generation = frame.generation, "Dropping stale feed frame");
            return;
        }

        match frame.event {
            FeedEvent::AgentMessage { message } => {
                EventLogger::log_event(
                    frame.generation,
                    SessionEvent::Message {
                        agent: message.agent_name.clone(),
                        content: message.content.clone(),
                    },
                );
                self.view.push_chat(&message, &self.session.agents);
                self.session.push_message(message);
                self.view.update_stats(&self.session);
            }
            FeedEvent::ConversationSnapshot { days, is_final } => {
                self.view.render_conversations(&days, &self.session.agents);
                if is_final {
                    self.session.running = false;
                    self.view.notifications.success("Simulation completed!");
                }
            }
            FeedEvent::FeedError { error } => {
                EventLogger::log_event(
                    frame.generation,
                    SessionEvent::FeedFailure { error_msg: error.clone() },
                );
                self.view.render_feed_error(error);
            }
            FeedEvent::StatusChanged { status } => {
                EventLogger::log_event(
                    frame.generation,
                    SessionEvent::StatusTransition {
                        experiment_id: self.session.experiment_id.clone().unwrap_or_default(),
                        status: status.to_string(),
                    },
                );
                if matches!(status, ExperimentStatus::Failed | ExperimentStatus::Unknown) {
                    self.session.running = false;
                }
            }
            FeedEvent::ResultAvailable { raw_report } => {
                self.latest_raw_report = Some(raw_report);
            }
            FeedEvent::ModeratorReport { report } => {
                let key = self.session.selected_experiment.clone().unwrap_or_default();
                let context = ReportContext {
                    experiment_name: experiment_name(&key).to_string(),
                    experiment_id: self.session.experiment_id.clone(),
                    message_count: self.session.message_count(),
                };
                self.view.render_report(&report, &context);
            }
            FeedEvent::SimulationCreated { agent_count } => {
                self.view
                    .notifications
                    .info(format!("Simulation created with {} agents", agent_count));
            }
            FeedEvent::AgentStatus { agent_name, status } => {
                let transient = status != AGENT_STATUS_IDLE;
                self.session.agents.set_status(&agent_name, status);
                if transient {
                    self.schedule_status_revert(agent_name, frame.generation);
                }
            }
            FeedEvent::GoalProgress { percent } => {
                self.session.goal_progress = percent;
                self.view.update_stats(&self.session);
            }
            FeedEvent::Notice { level, text } => {
                self.view.notifications.push(level, text);
            }
        }
    }

    /// Revert the transient status label after the standard delay. One
    /// revert timer at a time; a newer speaker supersedes the pending revert.
    fn schedule_status_revert(&mut self, agent_name: String, generation: u64) {
        let feed_tx = self.feed_tx.clone();
        self.timers.spawn(TimerKind::StatusRevert, async move {
            tokio::time::sleep(STATUS_REVERT_DELAY).await;
            let _ = feed_tx
                .send(FeedFrame::new(
                    generation,
                    FeedEvent::AgentStatus {
                        agent_name,
                        status: AGENT_STATUS_IDLE.to_string(),
                    },
                ))
                .await;
        });
    }

    /// Pre-rendered lines for the template configuration region.
    pub fn template_lines(&self) -> Vec<String> {
        let Some(editor) = &self.editor else {
            return vec!["No template loaded.".to_string()];
        };
        let working = &editor.working;
        let mut lines = vec![
            format!("Template: {}", working.template_name),
            format!("Active id: {}", editor.active_template_id()),
            String::new(),
            format!("Rounds: {}  (+/- to adjust)", working.rounds),
            format!("Conversations per round: {}", working.conversations_per_round),
            format!("Description: {}", working.description),
            String::new(),
        ];
        for (name, faction) in &working.factions {
            lines.push(format!("[{}]  {} agents", name, faction.agent_count));
            lines.push(format!("  prompt: {}", faction.faction_prompt));
            for prompt in &faction.person_prompt {
                lines.push(format!("  - {}", prompt));
            }
        }
        lines
    }

    /// Pre-rendered lines for the review region.
    pub fn review_lines(&self) -> Vec<String> {
        let key = self.session.selected_experiment.as_deref().unwrap_or("none");
        let mut lines = vec![
            format!("Experiment: {}", experiment_name(key)),
            format!(
                "Mode: {}",
                if self.session.backend_connected { "backend run" } else { "offline demo" }
            ),
        ];
        if let Some(editor) = &self.editor {
            lines.push(format!("Template: {}", editor.active_template_id()));
            lines.push(format!("Rounds: {}", editor.working.rounds));
            lines.push(format!(
                "Conversations per round: {}",
                editor.working.conversations_per_round
            ));
        }
        lines.push(String::new());
        lines.push("Press 's' to start the simulation.".to_string());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simdash_core::types::ChatMessage;

    fn dashboard() -> Dashboard {
        let api = Arc::new(ApiClient::new("http://localhost:8000"));
        let (feed_tx, _feed_rx) = mpsc::channel(16);
        Dashboard::new(api, feed_tx, Config::default())
    }

    #[tokio::test]
    async fn test_stale_frames_are_dropped() {
        let mut dash = dashboard();
        dash.session.generation = 2;

        dash.apply_frame(FeedFrame::new(
            1,
            FeedEvent::AgentMessage { message: ChatMessage::now("Ghost", "late render") },
        ));

        assert_eq!(dash.session.message_count(), 0);
    }

    #[tokio::test]
    async fn test_next_without_selection_blocks_and_notifies() {
        let mut dash = dashboard();
        dash.handle_action(Action::Next).await;
        assert_eq!(dash.session.step, WizardStep::SelectExperiment);
        assert!(dash.view.notifications.latest().is_some());
    }

    #[tokio::test]
    async fn test_select_then_next_loads_editor() {
        let mut dash = dashboard();
        dash.handle_action(Action::Select).await;
        dash.handle_action(Action::Next).await;
        assert_eq!(dash.session.step, WizardStep::ConfigureTemplate);
        assert!(dash.editor.is_some());
    }

    #[tokio::test]
    async fn test_offline_start_runs_mock_playback() {
        let mut dash = dashboard();
        dash.session.select_experiment("social-engineering");
        dash.session.step = WizardStep::ReviewSettings;

        dash.handle_action(Action::Start).await;

        assert_eq!(dash.session.step, WizardStep::RunningSimulation);
        assert!(dash.session.running);
        assert_eq!(dash.session.agents.len(), 6);
        assert!(dash.playback_running.is_some());
    }

    #[tokio::test]
    async fn test_final_snapshot_completes_session() {
        let mut dash = dashboard();
        dash.session.running = true;
        dash.apply_frame(FeedFrame::new(
            0,
            FeedEvent::ConversationSnapshot { days: vec![], is_final: true },
        ));
        assert!(!dash.session.running);
    }

    #[tokio::test]
    async fn test_goal_progress_reaches_stats() {
        let mut dash = dashboard();
        dash.apply_frame(FeedFrame::new(0, FeedEvent::GoalProgress { percent: 50 }));
        assert_eq!(dash.view.stats.goal_progress, 50);
    }

    #[tokio::test]
    async fn test_generate_report_offline_populates_view() {
        let mut dash = dashboard();
        dash.session.select_experiment("phishing");
        dash.session.step = WizardStep::RunningSimulation;

        dash.handle_action(Action::GenerateReport).await;

        assert_eq!(dash.session.step, WizardStep::Report);
        assert!(!dash.view.report.is_empty());
        assert!(dash.view.report.summary.iter().any(|l| l.contains("Phishing")));
    }

    #[tokio::test]
    async fn test_new_simulation_keeps_banner() {
        let mut dash = dashboard();
        dash.view.banner = simdash_session::notify::Banner::Online;
        dash.session.select_experiment("phishing");
        dash.session.push_message(ChatMessage::now("Phisher", "hi"));

        dash.handle_action(Action::NewSimulation).await;

        assert_eq!(dash.view.banner, simdash_session::notify::Banner::Online);
        assert_eq!(dash.session.message_count(), 0);
        assert!(dash.session.selected_experiment.is_none());
    }
}
