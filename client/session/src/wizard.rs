//! The five-step experiment wizard state machine.
//!
//! Forward from the selection step is gated on a non-empty selection;
//! starting and report generation are explicit actions rather than plain
//! "next" transitions; no backward navigation exists once a run started.

use serde::{Deserialize, Serialize};

use simdash_core::error::DashError;

use crate::state::Session;

/// Wizard steps, in order. The numeric value is what the step indicator shows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    SelectExperiment,
    ConfigureTemplate,
    ReviewSettings,
    RunningSimulation,
    Report,
}

impl WizardStep {
    pub fn number(self) -> u8 {
        match self {
            Self::SelectExperiment => 1,
            Self::ConfigureTemplate => 2,
            Self::ReviewSettings => 3,
            Self::RunningSimulation => 4,
            Self::Report => 5,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::SelectExperiment => "Select Experiment",
            Self::ConfigureTemplate => "Configure Template",
            Self::ReviewSettings => "Review Settings",
            Self::RunningSimulation => "Running Simulation",
            Self::Report => "Report",
        }
    }
}

/// The named view regions; each step shows exactly one primary region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewRegion {
    ExperimentPicker,
    TemplateConfig,
    ReviewSettings,
    SimulationDisplay,
    ReportDisplay,
}

/// Which navigation actions are offered at a given step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavButtons {
    pub back: bool,
    pub next: bool,
    pub start: bool,
    pub stop: bool,
}

/// The primary content region for a step.
pub fn primary_region(step: WizardStep) -> ViewRegion {
    match step {
        WizardStep::SelectExperiment => ViewRegion::ExperimentPicker,
        WizardStep::ConfigureTemplate => ViewRegion::TemplateConfig,
        WizardStep::ReviewSettings => ViewRegion::ReviewSettings,
        WizardStep::RunningSimulation => ViewRegion::SimulationDisplay,
        WizardStep::Report => ViewRegion::ReportDisplay,
    }
}

/// Navigation affordances per step.
pub fn nav_buttons(step: WizardStep) -> NavButtons {
    match step {
        WizardStep::SelectExperiment => NavButtons { back: false, next: true, start: false, stop: false },
        WizardStep::ConfigureTemplate => NavButtons { back: true, next: true, start: false, stop: false },
        WizardStep::ReviewSettings => NavButtons { back: true, next: false, start: true, stop: false },
        WizardStep::RunningSimulation => NavButtons { back: false, next: false, start: false, stop: true },
        WizardStep::Report => NavButtons { back: false, next: false, start: false, stop: false },
    }
}

/// Advance one step. Forward from the selection step requires a selection;
/// steps past ReviewSettings do not advance through this path (starting and
/// report generation are explicit actions).
pub fn advance(session: &mut Session) -> Result<WizardStep, DashError> {
    match session.step {
        WizardStep::SelectExperiment => {
            if session.selected_experiment.is_none() {
                return Err(DashError::NoSelection);
            }
            session.step = WizardStep::ConfigureTemplate;
        }
        WizardStep::ConfigureTemplate => {
            session.step = WizardStep::ReviewSettings;
        }
        WizardStep::ReviewSettings
        | WizardStep::RunningSimulation
        | WizardStep::Report => {}
    }
    Ok(session.step)
}

/// Step back one step. Only the two middle configuration steps go backward;
/// a running or reported session must be explicitly restarted.
pub fn retreat(session: &mut Session) -> WizardStep {
    match session.step {
        WizardStep::ConfigureTemplate => session.step = WizardStep::SelectExperiment,
        WizardStep::ReviewSettings => session.step = WizardStep::ConfigureTemplate,
        WizardStep::SelectExperiment
        | WizardStep::RunningSimulation
        | WizardStep::Report => {}
    }
    session.step
}

/// Start the simulation: ReviewSettings → RunningSimulation with the running
/// flag raised. The caller decides between live polling and mock playback.
pub fn start(session: &mut Session) -> Result<WizardStep, DashError> {
    if session.step != WizardStep::ReviewSettings {
        return Ok(session.step);
    }
    if session.selected_experiment.is_none() {
        return Err(DashError::NoSelection);
    }
    session.running = true;
    session.step = WizardStep::RunningSimulation;
    Ok(session.step)
}

/// Explicit "generate report" action: RunningSimulation → Report. Never
/// automatic.
pub fn generate_report(session: &mut Session) -> WizardStep {
    if session.step == WizardStep::RunningSimulation {
        session.step = WizardStep::Report;
    }
    session.step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_blocked_without_selection() {
        let mut session = Session::new();
        assert!(advance(&mut session).is_err());
        assert_eq!(session.step, WizardStep::SelectExperiment);
    }

    #[test]
    fn test_forward_and_back_through_configuration() {
        let mut session = Session::new();
        session.select_experiment("phishing");

        assert_eq!(advance(&mut session).unwrap(), WizardStep::ConfigureTemplate);
        assert_eq!(advance(&mut session).unwrap(), WizardStep::ReviewSettings);
        assert_eq!(retreat(&mut session), WizardStep::ConfigureTemplate);
        assert_eq!(retreat(&mut session), WizardStep::SelectExperiment);
        // Back is disabled at the first step.
        assert_eq!(retreat(&mut session), WizardStep::SelectExperiment);
    }

    #[test]
    fn test_step_stays_in_range_for_any_action_sequence() {
        let mut session = Session::new();
        session.select_experiment("bribery");
        // Hammer the controller with a mixed action sequence; the step must
        // stay within the five defined states throughout.
        for i in 0..100 {
            match i % 5 {
                0 => {
                    let _ = advance(&mut session);
                }
                1 => {
                    retreat(&mut session);
                }
                2 => {
                    let _ = advance(&mut session);
                }
                3 => {
                    let _ = start(&mut session);
                }
                _ => {
                    generate_report(&mut session);
                }
            }
            assert!((1..=5).contains(&session.step.number()));
        }
    }

    #[test]
    fn test_no_backward_from_running_or_report() {
        let mut session = Session::new();
        session.select_experiment("groupthink");
        advance(&mut session).unwrap();
        advance(&mut session).unwrap();
        start(&mut session).unwrap();
        assert_eq!(session.step, WizardStep::RunningSimulation);
        assert_eq!(retreat(&mut session), WizardStep::RunningSimulation);

        generate_report(&mut session);
        assert_eq!(session.step, WizardStep::Report);
        assert_eq!(retreat(&mut session), WizardStep::Report);
    }

    #[test]
    fn test_report_only_from_running() {
        let mut session = Session::new();
        assert_eq!(generate_report(&mut session), WizardStep::SelectExperiment);
    }

    #[test]
    fn test_each_step_has_one_primary_region() {
        let steps = [
            WizardStep::SelectExperiment,
            WizardStep::ConfigureTemplate,
            WizardStep::ReviewSettings,
            WizardStep::RunningSimulation,
            WizardStep::Report,
        ];
        let mut regions: Vec<_> = steps.iter().map(|s| primary_region(*s)).collect();
        regions.dedup();
        assert_eq!(regions.len(), steps.len());
    }

    #[test]
    fn test_nav_button_table() {
        assert!(!nav_buttons(WizardStep::SelectExperiment).back);
        assert!(nav_buttons(WizardStep::ConfigureTemplate).back);
        assert!(nav_buttons(WizardStep::ReviewSettings).start);
        assert!(!nav_buttons(WizardStep::ReviewSettings).next);
        assert!(nav_buttons(WizardStep::RunningSimulation).stop);
        let report = nav_buttons(WizardStep::Report);
        assert!(!report.back && !report.next && !report.start && !report.stop);
    }
}
