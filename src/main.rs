//! Robot Commander - Entry Point
//!
//! Interactive terminal session: type a program line by line, then run it
//! against the current level and watch where the robot ends up.

use robot_commander::core::config::{GameConfig, DEFAULT_CONFIG_PATH};
use robot_commander::core::error::Result;
use robot_commander::simulation::Simulation;
use robot_commander::ui::{FeedbackTone, ProgramController, RunRequest};
use robot_commander::world::{LevelDefinition, DEFAULT_LEVEL_PATH};

use std::io::{self, Write};
use std::path::Path;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "robot_commander=info".into()),
        )
        .init();

    tracing::info!("Robot Commander starting...");

    let config = GameConfig::load_or_default(Path::new(DEFAULT_CONFIG_PATH))?;
    let level_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_LEVEL_PATH.to_string());
    let level = load_level(Path::new(&level_path))?;

    let mut simulation = Simulation::new(&config.robot, &level);
    let mut controller = ProgramController::new();
    let mut program: Vec<String> = Vec::new();

    println!("\n=== ROBOT COMMANDER ===");
    println!("Level: {}", simulation.level_name());
    println!();
    println!("Type commands one per line, then:");
    println!("  :run     - Run the program");
    println!("  :reset   - Put the robot back at the start");
    println!("  :help    - Show the command reference");
    println!("  :list    - Show the program");
    println!("  :clear   - Clear the program");
    println!("  :status  - Show robot and level status");
    println!("  :quit    - Exit");
    println!();

    loop {
        print!("{:>3}> ", program.len() + 1);
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        match input {
            "" => continue,
            ":quit" | ":q" => break,
            ":help" | ":h" => {
                controller.on_help_clicked();
                if controller.panel.help_visible {
                    println!("\n{}\n", controller.help_text());
                }
            }
            ":list" | ":l" => {
                for (index, line) in program.iter().enumerate() {
                    println!("{:>3}  {}", index + 1, line);
                }
            }
            ":clear" | ":c" => {
                program.clear();
                println!("Program cleared.");
            }
            ":status" | ":s" => display_status(&simulation),
            ":reset" | ":r" => {
                controller.on_reset_clicked(&mut simulation);
                print_feedback(&controller);
                display_status(&simulation);
            }
            ":run" => {
                controller.set_program(&program.join("\n"));
                run_program(&mut controller, &mut simulation, &config);
            }
            _ if input.starts_with(':') => {
                println!("Unknown command. Available: :run, :reset, :help, :list, :clear, :status, :quit");
            }
            line => program.push(line.to_string()),
        }
    }

    println!(
        "\nGoodbye! Collected {} item(s) on {}.",
        simulation.collected_total(),
        simulation.level_name()
    );
    Ok(())
}

fn load_level(path: &Path) -> Result<LevelDefinition> {
    if path.exists() {
        LevelDefinition::load(path)
    } else {
        tracing::warn!(path = %path.display(), "Level file not found - using an empty field");
        Ok(LevelDefinition {
            name: "Open Field".to_string(),
            ..LevelDefinition::default()
        })
    }
}

fn run_program(controller: &mut ProgramController, simulation: &mut Simulation, config: &GameConfig) {
    let report = match controller.on_run_clicked(simulation) {
        RunRequest::Busy => {
            println!("Robot is busy.");
            return;
        }
        RunRequest::EmptyInput => {
            print_feedback(controller);
            return;
        }
        RunRequest::NoValidCommands(report) | RunRequest::Started(report) => report,
    };

    for rejected in &report.rejected {
        println!(
            "  line {}: {} ({})",
            rejected.line_number, rejected.text, rejected.reason
        );
    }
    print_feedback(controller);
    if report.is_empty() {
        return;
    }

    let dt = config.simulation.fixed_timestep;
    let mut elapsed = 0.0;
    while simulation.is_running() && elapsed < config.simulation.max_run_seconds {
        let report = simulation.tick(dt);
        controller.advance_clock(dt);
        elapsed += dt;
        if !report.events.is_empty() {
            controller.absorb(&report);
            print_feedback(controller);
        }
    }

    display_status(simulation);
}

fn print_feedback(controller: &ProgramController) {
    let marker = match controller.panel.tone {
        FeedbackTone::Normal => "..",
        FeedbackTone::Success => "OK",
        FeedbackTone::Error => "!!",
    };
    println!("[{}] {}", marker, controller.panel.message);
}

fn display_status(simulation: &Simulation) {
    let pose = simulation.pose();
    println!(
        "Robot at ({:.2}, {:.2}, {:.2}) heading {:.1} deg - {:?}",
        pose.position.x,
        pose.position.y,
        pose.position.z,
        pose.heading_degrees(),
        simulation.state()
    );
    if let Some(outcome) = simulation.executor().last_outcome() {
        println!("Last run: {:?}", outcome);
    }
    println!(
        "Collectibles: {} collected, {} remaining",
        simulation.collected_total(),
        simulation.world().collectibles_remaining()
    );
}
