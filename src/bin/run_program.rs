//! Headless Program Runner
//!
//! Runs a robot program against a level and prints where the robot ended up.

use robot_commander::command::parse_program;
use robot_commander::core::config::{GameConfig, DEFAULT_CONFIG_PATH};
use robot_commander::core::error::{Result, RobotError};
use robot_commander::robot::ExecutionEvent;
use robot_commander::simulation::Simulation;
use robot_commander::world::{LevelDefinition, DEFAULT_LEVEL_PATH};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

/// Headless Program Runner - execute a robot program without the editor
#[derive(Parser, Debug)]
#[command(name = "run_program")]
#[command(about = "Run a robot program against a level and report the result")]
struct Args {
    /// File holding the program, one command per line
    #[arg(long)]
    program: PathBuf,

    /// Level definition (TOML)
    #[arg(long, default_value = DEFAULT_LEVEL_PATH)]
    level: PathBuf,

    /// Game configuration (TOML)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Fixed timestep in seconds (defaults to the configured one)
    #[arg(long)]
    dt: Option<f32>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

#[derive(Serialize)]
struct RejectedOutput {
    line: usize,
    text: String,
    reason: String,
}

/// JSON output structure
#[derive(Serialize)]
struct RunResult {
    level: String,
    outcome: String,
    timed_out: bool,
    ticks: u64,
    elapsed: f32,
    position: [f32; 3],
    heading: f32,
    events: Vec<ExecutionEvent>,
    collected: usize,
    destroyed: usize,
    collectibles_remaining: usize,
    accepted: Vec<String>,
    rejected: Vec<RejectedOutput>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "robot_commander=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match execute(&args) {
        Ok(result) => {
            print_result(&result, &args.format);
            if result.accepted.is_empty() {
                ExitCode::from(2)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(err) => {
            eprintln!("run_program: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn execute(args: &Args) -> Result<RunResult> {
    let config = GameConfig::load_or_default(&args.config)?;
    let level = LevelDefinition::load(&args.level)?;
    let source = std::fs::read_to_string(&args.program)?;
    let dt = args.dt.unwrap_or(config.simulation.fixed_timestep);
    if !dt.is_finite() || dt <= 0.0 {
        return Err(RobotError::InvalidConfig(format!(
            "timestep must be positive, got {}",
            dt
        )));
    }

    let report = parse_program(&source);
    let rejected = report
        .rejected
        .iter()
        .map(|line| RejectedOutput {
            line: line.line_number,
            text: line.text.clone(),
            reason: line.reason.to_string(),
        })
        .collect();

    let mut simulation = Simulation::new(&config.robot, &level);

    let mut result = RunResult {
        level: simulation.level_name().to_string(),
        outcome: "NothingToRun".to_string(),
        timed_out: false,
        ticks: 0,
        elapsed: 0.0,
        position: simulation.pose().position.to_array(),
        heading: simulation.pose().heading_degrees(),
        events: Vec::new(),
        collected: 0,
        destroyed: 0,
        collectibles_remaining: simulation.world().collectibles_remaining(),
        accepted: report.accepted.clone(),
        rejected,
    };

    if report.is_empty() {
        return Ok(result);
    }

    simulation.run(&report.accepted)?;
    let summary = simulation.run_to_completion(dt, config.simulation.max_run_seconds);

    result.outcome = match summary.outcome {
        Some(outcome) if !summary.timed_out => format!("{:?}", outcome),
        _ => "TimedOut".to_string(),
    };
    result.timed_out = summary.timed_out;
    result.ticks = summary.ticks;
    result.elapsed = summary.elapsed;
    result.position = summary.final_pose.position.to_array();
    result.heading = summary.final_pose.heading_degrees();
    result.events = summary.events;
    result.collected = summary.collected.len();
    result.destroyed = summary.destroyed.len();
    result.collectibles_remaining = simulation.world().collectibles_remaining();
    Ok(result)
}

fn print_result(result: &RunResult, format: &str) {
    match format {
        "text" => {
            println!("Program Result");
            println!("==============");
            println!("Level: {}", result.level);
            println!("Outcome: {}", result.outcome);
            println!("Ticks: {} ({:.2}s)", result.ticks, result.elapsed);
            println!(
                "Position: ({:.2}, {:.2}, {:.2})",
                result.position[0], result.position[1], result.position[2]
            );
            println!("Heading: {:.1} deg", result.heading);
            println!(
                "Collectibles: {} collected, {} remaining",
                result.collected, result.collectibles_remaining
            );
            if result.destroyed > 0 {
                println!("Obstacles destroyed: {}", result.destroyed);
            }
            println!();
            println!("Commands ({}):", result.accepted.len());
            for command in &result.accepted {
                println!("  {}", command);
            }
            for line in &result.rejected {
                println!("  line {} rejected: {} ({})", line.line, line.text, line.reason);
            }
        }
        other => {
            if other != "json" {
                eprintln!("Unknown format '{}', defaulting to json", other);
            }
            match serde_json::to_string_pretty(result) {
                Ok(json) => println!("{}", json),
                Err(err) => eprintln!("run_program: {}", err),
            }
        }
    }
}
