//! Integration tests for running typed programs against whole levels

use robot_commander::command::parse_program;
use robot_commander::core::config::RobotConfig;
use robot_commander::robot::{ExecutionEvent, ExecutionState, RunOutcome};
use robot_commander::simulation::Simulation;
use robot_commander::ui::{FeedbackTone, ProgramController, RunRequest};
use robot_commander::world::LevelDefinition;
use glam::Vec3;
use std::path::Path;

const DT: f32 = 1.0 / 60.0;

const YARD: &str = r#"
    name = "Yard"

    [robot]
    position = [0.0, 0.0, 0.0]
    heading = 0.0

    [[obstacles]]
    kind = "rock"
    position = [0.0, 0.0, 4.0]

    [[obstacles]]
    name = "crate"
    kind = "barrier"
    position = [4.0, 0.0, 0.0]
    destructible = true
    hits_to_destroy = 2

    [[collectibles]]
    name = "gem"
    position = [-3.0, 0.0, 0.0]
    radius = 0.3
"#;

fn yard() -> Simulation {
    let level = LevelDefinition::from_toml_str(YARD).unwrap();
    Simulation::new(&RobotConfig::default(), &level)
}

#[test]
fn test_blocked_program_drops_remaining_commands() {
    let mut sim = yard();
    let report = parse_program("move_forward(10)\nROTATE(90)\nMOVE_FORWARD(1)");
    assert_eq!(report.accepted.len(), 3);

    sim.run(&report.accepted).unwrap();
    let summary = sim.run_to_completion(DT, 60.0);

    assert_eq!(summary.outcome, Some(RunOutcome::Blocked));
    assert_eq!(sim.state(), ExecutionState::Idle);
    // Rock face at z = 3.5, robot radius 0.5
    let position = summary.final_pose.position;
    assert!(position.z > 3.0 && position.z < 3.1, "stopped at {:?}", position);
    assert!(position.x.abs() < 1e-4);
    assert!(summary.final_pose.heading_degrees().abs() < 1e-3);
    assert_eq!(sim.executor().remaining_instructions(), 0);
}

#[test]
fn test_robot_against_rock_stays_stuck_until_reset() {
    let mut sim = yard();
    sim.run(&["MOVE_FORWARD(10)"]).unwrap();
    assert_eq!(
        sim.run_to_completion(DT, 60.0).outcome,
        Some(RunOutcome::Blocked)
    );

    sim.run(&["MOVE_FORWARD(1)"]).unwrap();
    let pushed = sim.run_to_completion(DT, 60.0);
    assert_eq!(pushed.outcome, Some(RunOutcome::Blocked));
    assert!(pushed.final_pose.position.z < 3.2);

    sim.reset();
    sim.run(&["MOVE_FORWARD(1)"]).unwrap();
    let after_reset = sim.run_to_completion(DT, 60.0);
    assert_eq!(after_reset.outcome, Some(RunOutcome::Completed));
    assert!(after_reset
        .final_pose
        .position
        .abs_diff_eq(Vec3::new(0.0, 0.0, 1.0), 1e-3));
}

#[test]
fn test_turn_and_collect() {
    let mut sim = yard();
    let report = parse_program("ROTATE(-90)\nMOVE_FORWARD(4)");
    sim.run(&report.accepted).unwrap();
    let summary = sim.run_to_completion(DT, 60.0);

    assert_eq!(summary.outcome, Some(RunOutcome::Completed));
    assert!(summary
        .final_pose
        .position
        .abs_diff_eq(Vec3::new(-4.0, 0.0, 0.0), 1e-3));
    assert!((summary.final_pose.heading_degrees() - 270.0).abs() < 1e-2);
    assert_eq!(summary.collected.len(), 1);
    assert!(summary.events.contains(&ExecutionEvent::CollectibleFound));
    assert_eq!(sim.world().collectibles_remaining(), 0);
}

#[test]
fn test_destructible_crate_needs_repeated_hits() {
    let mut sim = yard();
    let program = ["ROTATE(90)", "MOVE_FORWARD(5)"];

    sim.run(&program).unwrap();
    let first = sim.run_to_completion(DT, 60.0);
    assert_eq!(first.outcome, Some(RunOutcome::Blocked));
    assert!(first.destroyed.is_empty());

    sim.reset();
    sim.run(&program).unwrap();
    let second = sim.run_to_completion(DT, 60.0);
    assert_eq!(second.outcome, Some(RunOutcome::Blocked));
    assert_eq!(second.destroyed.len(), 1);

    sim.reset();
    sim.run(&program).unwrap();
    let third = sim.run_to_completion(DT, 60.0);
    assert_eq!(third.outcome, Some(RunOutcome::Completed));
    assert!(third
        .final_pose
        .position
        .abs_diff_eq(Vec3::new(5.0, 0.0, 0.0), 1e-3));
}

#[test]
fn test_invalid_lines_are_skipped_not_fatal() {
    let mut sim = yard();
    let report = parse_program("ROTATE(180)\nJUMP(2)\nMOVE_FORWARD(25)\nMOVE_FORWARD(2)");
    assert_eq!(report.accepted, vec!["ROTATE(180)", "MOVE_FORWARD(2)"]);
    assert_eq!(report.rejected.len(), 2);
    assert_eq!(report.rejected[0].line_number, 2);
    assert_eq!(report.rejected[1].line_number, 3);

    sim.run(&report.accepted).unwrap();
    let summary = sim.run_to_completion(DT, 60.0);
    assert_eq!(summary.outcome, Some(RunOutcome::Completed));
    assert!(summary
        .final_pose
        .position
        .abs_diff_eq(Vec3::new(0.0, 0.0, -2.0), 1e-3));
}

#[test]
fn test_controller_drives_full_session() {
    let mut sim = yard();
    let mut controller = ProgramController::new();

    controller.set_program("");
    assert_eq!(controller.on_run_clicked(&mut sim), RunRequest::EmptyInput);

    controller.set_program("ROTATE(-90)\nMOVE_FORWARD(4)");
    assert!(matches!(
        controller.on_run_clicked(&mut sim),
        RunRequest::Started(_)
    ));
    assert_eq!(controller.panel.message, "Executing commands...");

    let mut saw_collectible = false;
    while sim.is_running() {
        let report = sim.tick(DT);
        controller.advance_clock(DT);
        if report.events.contains(&ExecutionEvent::CollectibleFound) {
            saw_collectible = true;
        }
        controller.absorb(&report);
    }

    assert!(saw_collectible);
    assert_eq!(controller.panel.message, "Execution complete!");
    assert_eq!(controller.panel.tone, FeedbackTone::Success);
    assert!(controller.panel.controls_enabled);
    assert!(controller
        .panel
        .action_log
        .iter()
        .any(|entry| entry.message == "Collectible found! Level complete!"));

    controller.on_reset_clicked(&mut sim);
    assert_eq!(sim.pose().position, Vec3::ZERO);
    assert_eq!(controller.panel.message, "Robot reset!");
}

#[test]
fn test_shipped_level_is_solvable() {
    let path = Path::new("data/levels/level_01.toml");
    if !path.exists() {
        eprintln!("Skipping test: level file not found");
        return;
    }
    let level = LevelDefinition::load(path).unwrap();
    let mut sim = Simulation::new(&RobotConfig::default(), &level);

    let report = parse_program("MOVE_FORWARD(4)\nROTATE(90)\nMOVE_FORWARD(3)");
    sim.run(&report.accepted).unwrap();
    let summary = sim.run_to_completion(DT, 60.0);

    assert_eq!(summary.outcome, Some(RunOutcome::Completed));
    assert_eq!(summary.collected.len(), 1);
    assert_eq!(sim.world().collectibles_remaining(), 0);
}
