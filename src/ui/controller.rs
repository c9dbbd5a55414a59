//! Button handlers for the programming screen
//!
//! Owns the feedback panel and the program text; talks to the simulation
//! only through run/reset requests and the events it publishes.

use crate::command::{command_help, parse_program, ParseReport};
use crate::robot::events::dispatch;
use crate::simulation::{Simulation, TickReport};
use crate::ui::state::{FeedbackPanel, FeedbackTone};

/// Result of pressing Run
#[derive(Debug, Clone, PartialEq)]
pub enum RunRequest {
    /// Run button pressed while a run is in progress
    Busy,
    /// No text in the editor
    EmptyInput,
    /// Text present but no line passed the grammar
    NoValidCommands(ParseReport),
    Started(ParseReport),
}

#[derive(Debug, Default)]
pub struct ProgramController {
    pub panel: FeedbackPanel,
    pub program: String,
}

impl ProgramController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_program(&mut self, text: &str) {
        self.program = text.to_string();
    }

    pub fn help_text(&self) -> &'static str {
        command_help()
    }

    pub fn on_run_clicked(&mut self, simulation: &mut Simulation) -> RunRequest {
        if simulation.is_running() {
            return RunRequest::Busy;
        }

        if self.program.trim().is_empty() {
            self.panel.show("Enter commands first!", FeedbackTone::Error);
            return RunRequest::EmptyInput;
        }

        let report = parse_program(&self.program);
        if report.is_empty() {
            self.panel.show("No valid commands found!", FeedbackTone::Error);
            return RunRequest::NoValidCommands(report);
        }

        match simulation.run(&report.accepted) {
            Ok(()) => {
                dispatch(simulation.drain_events(), &mut self.panel);
                RunRequest::Started(report)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Run request refused");
                RunRequest::Busy
            }
        }
    }

    pub fn on_reset_clicked(&mut self, simulation: &mut Simulation) {
        simulation.reset();
        // Reset never publishes a finish event, so re-enable here
        self.panel.set_controls_enabled(true);
        self.panel.show("Robot reset!", FeedbackTone::Normal);
    }

    pub fn on_help_clicked(&mut self) {
        self.panel.toggle_help();
    }

    /// Forward a tick's notifications to the panel
    pub fn absorb(&mut self, report: &TickReport) {
        dispatch(report.events.iter().copied(), &mut self.panel);
    }

    /// Advance the panel clock
    pub fn advance_clock(&mut self, dt: f32) {
        self.panel.time += dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RobotConfig;
    use crate::core::types::Pose;
    use crate::world::objects::WorldObjects;

    fn simulation() -> Simulation {
        Simulation::from_parts(
            &RobotConfig::default(),
            "test",
            WorldObjects::new(),
            Pose::default(),
        )
    }

    #[test]
    fn test_empty_program_is_reported() {
        let mut sim = simulation();
        let mut controller = ProgramController::new();
        controller.set_program("   \n");
        assert_eq!(controller.on_run_clicked(&mut sim), RunRequest::EmptyInput);
        assert_eq!(controller.panel.message, "Enter commands first!");
        assert_eq!(controller.panel.tone, FeedbackTone::Error);
        assert!(!sim.is_running());
    }

    #[test]
    fn test_comment_only_program_has_nothing_to_run() {
        let mut sim = simulation();
        let mut controller = ProgramController::new();
        controller.set_program("// just a comment\nWALK(3)");
        let request = controller.on_run_clicked(&mut sim);
        match request {
            RunRequest::NoValidCommands(report) => assert_eq!(report.rejected.len(), 1),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(controller.panel.message, "No valid commands found!");
        assert!(!sim.is_running());
    }

    #[test]
    fn test_run_then_finish_updates_panel() {
        let mut sim = simulation();
        let mut controller = ProgramController::new();
        controller.set_program("MOVE_FORWARD(1)");

        assert!(matches!(
            controller.on_run_clicked(&mut sim),
            RunRequest::Started(_)
        ));
        assert!(!controller.panel.controls_enabled);
        assert_eq!(controller.on_run_clicked(&mut sim), RunRequest::Busy);

        while sim.is_running() {
            let report = sim.tick(1.0 / 30.0);
            controller.absorb(&report);
        }
        assert!(controller.panel.controls_enabled);
        assert_eq!(controller.panel.message, "Execution complete!");
    }

    #[test]
    fn test_reset_reenables_controls() {
        let mut sim = simulation();
        let mut controller = ProgramController::new();
        controller.set_program("MOVE_FORWARD(5)");
        controller.on_run_clicked(&mut sim);
        sim.tick(0.5);

        controller.on_reset_clicked(&mut sim);
        assert!(controller.panel.controls_enabled);
        assert_eq!(controller.panel.message, "Robot reset!");
        assert_eq!(*sim.pose(), Pose::default());
    }

    #[test]
    fn test_help_toggle() {
        let mut controller = ProgramController::new();
        controller.on_help_clicked();
        assert!(controller.panel.help_visible);
        assert!(controller.help_text().contains("ROTATE"));
    }
}
