//! Actuation executor - drains an instruction sequence against the robot pose
//!
//! Driven by `tick(dt)` from the host loop. At most one interpolation is in
//! flight; the next instruction starts only after the current one and its
//! trailing pause have finished. A collision with an obstacle or a reset
//! preempts the in-flight motion at the next call.
//!
//! ```text
//! Idle --run--> Running --completion--> Idle
//! Running --collision--> Blocked --cleanup--> Idle
//! (any) --reset--> Idle
//! ```

use crate::command::{Instruction, InstructionSequence};
use crate::core::config::RobotConfig;
use crate::core::error::{Result, RobotError};
use crate::core::types::{Pose, Seconds, COLLECTIBLE_TAG, OBSTACLE_TAG};
use crate::robot::contact::{CollisionResponse, HitReceiver};
use crate::robot::events::ExecutionEvent;
use crate::robot::motion::Motion;
use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionState {
    Idle,
    Running,
    /// Transient: a collision is being cleaned up
    Blocked,
}

/// How the most recent run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    Completed,
    Blocked,
    /// Reset while running
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
enum Step {
    /// Waiting to take the next line off the sequence
    Ready,
    Moving {
        instruction: Instruction,
        motion: Motion,
    },
    Pausing {
        remaining: Seconds,
    },
}

pub struct Executor {
    config: RobotConfig,
    initial_pose: Pose,
    pose: Pose,
    velocity: Vec3,
    state: ExecutionState,
    sequence: InstructionSequence,
    step: Step,
    last_outcome: Option<RunOutcome>,
    events: Vec<ExecutionEvent>,
}

impl Executor {
    /// Create an executor; `initial_pose` is where reset returns to
    pub fn new(config: RobotConfig, initial_pose: Pose) -> Self {
        tracing::info!(position = ?initial_pose.position, "Robot initialized");
        Self {
            config,
            initial_pose,
            pose: initial_pose,
            velocity: Vec3::ZERO,
            state: ExecutionState::Idle,
            sequence: InstructionSequence::new(),
            step: Step::Ready,
            last_outcome: None,
            events: Vec::new(),
        }
    }

    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    pub fn initial_pose(&self) -> &Pose {
        &self.initial_pose
    }

    /// Linear velocity over the last tick (units per second)
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn state(&self) -> ExecutionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ExecutionState::Running
    }

    /// A move or rotate is in flight (not pausing between steps)
    pub fn is_moving(&self) -> bool {
        self.is_running() && matches!(self.step, Step::Moving { .. })
    }

    pub fn last_outcome(&self) -> Option<RunOutcome> {
        self.last_outcome
    }

    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    /// Instruction whose motion is currently in flight
    pub fn current_instruction(&self) -> Option<Instruction> {
        match &self.step {
            Step::Moving { instruction, .. } => Some(*instruction),
            _ => None,
        }
    }

    /// Lines not yet started in the current run
    pub fn remaining_instructions(&self) -> usize {
        self.sequence.remaining()
    }

    /// Start executing `commands` in order
    ///
    /// Refused with no state change when a run is already in progress or
    /// there is nothing to run.
    pub fn run<S: AsRef<str>>(&mut self, commands: &[S]) -> Result<()> {
        if self.is_running() {
            tracing::warn!("Robot is already executing commands!");
            return Err(RobotError::AlreadyRunning);
        }
        if commands.is_empty() {
            tracing::warn!("No commands to execute!");
            return Err(RobotError::NothingToRun);
        }

        self.sequence = InstructionSequence::from_commands(commands);
        self.step = Step::Ready;
        self.state = ExecutionState::Running;
        self.last_outcome = None;
        self.events.push(ExecutionEvent::ExecutionStarted);
        tracing::info!("Starting execution of {} commands", self.sequence.total());
        Ok(())
    }

    /// Advance the running sequence by `dt` seconds
    ///
    /// Time left over when a motion or pause completes carries into the next
    /// stage, so the outcome does not depend on tick size.
    pub fn tick(&mut self, dt: Seconds) {
        if !self.is_running() {
            self.velocity = Vec3::ZERO;
            return;
        }

        let dt = dt.max(0.0);
        let before = self.pose.position;
        let mut budget = dt;

        loop {
            match self.step {
                Step::Ready => {
                    let Some(command) = self.sequence.pop_next() else {
                        self.finish(RunOutcome::Completed);
                        break;
                    };
                    self.begin(&command);
                }
                Step::Moving {
                    instruction,
                    ref mut motion,
                } => {
                    let Some(leftover) = motion.advance(&mut self.pose, budget) else {
                        break;
                    };
                    self.log_completed(instruction);
                    self.step = Step::Pausing {
                        remaining: self.config.command_pause,
                    };
                    budget = leftover;
                }
                Step::Pausing { ref mut remaining } => {
                    if budget < *remaining {
                        *remaining -= budget;
                        break;
                    }
                    budget -= *remaining;
                    self.step = Step::Ready;
                }
            }
        }

        self.velocity = if self.is_running() && dt > 0.0 {
            (self.pose.position - before) / dt
        } else {
            Vec3::ZERO
        };
        tracing::debug!(position = ?self.pose.position, velocity = ?self.velocity, "tick");
    }

    /// Physical contact with a tagged object
    ///
    /// Contact with an obstacle while a motion is in flight freezes the robot
    /// where it stands, notifies the obstacle, and ends the run. The rest of
    /// the sequence is discarded.
    pub fn on_collision_enter(
        &mut self,
        tag: &str,
        obstacle: Option<&mut dyn HitReceiver>,
    ) -> CollisionResponse {
        if tag != OBSTACLE_TAG {
            return CollisionResponse::Ignored;
        }

        if !self.is_moving() {
            tracing::debug!(state = ?self.state, "Obstacle contact with no motion in flight");
            return CollisionResponse::Ignored;
        }

        self.step = Step::Ready;
        self.velocity = Vec3::ZERO;
        self.state = ExecutionState::Blocked;

        let hit = obstacle.map(|obstacle| obstacle.notify_hit());
        tracing::info!(
            position = ?self.pose.position,
            discarded = self.sequence.remaining(),
            ?hit,
            "Robot stopped: motion interrupted by collision"
        );

        self.finish(RunOutcome::Blocked);
        CollisionResponse::Halted { hit }
    }

    /// Trigger-volume overlap with a tagged object
    ///
    /// Returns true when the object is a collectible and should be removed
    /// from the world. Never interrupts the running sequence.
    pub fn on_trigger_enter(&mut self, tag: &str) -> bool {
        if tag != COLLECTIBLE_TAG {
            return false;
        }
        tracing::info!("Collectible found!");
        self.events.push(ExecutionEvent::CollectibleFound);
        true
    }

    /// Cancel any run and put the robot back where it started
    ///
    /// Safe in any state. Does not publish `ExecutionFinished`.
    pub fn reset(&mut self) {
        if self.is_running() {
            tracing::info!(
                discarded = self.sequence.remaining(),
                "Cancelling command execution"
            );
            self.last_outcome = Some(RunOutcome::Cancelled);
        }

        self.sequence.clear();
        self.step = Step::Ready;
        self.pose = self.initial_pose;
        self.velocity = Vec3::ZERO;
        self.state = ExecutionState::Idle;
        tracing::info!(position = ?self.pose.position, "Robot reset to starting position");
    }

    /// Take all notifications published since the last call
    pub fn drain_events(&mut self) -> Vec<ExecutionEvent> {
        std::mem::take(&mut self.events)
    }

    fn begin(&mut self, command: &str) {
        tracing::info!(
            "Executing command {}/{}: {}",
            self.sequence.position(),
            self.sequence.total(),
            command
        );

        match command.parse::<Instruction>() {
            Ok(instruction) => {
                let motion = match instruction {
                    Instruction::MoveForward { distance } => {
                        Motion::translate(&self.pose, distance, self.config.move_speed)
                    }
                    Instruction::Rotate { degrees } => {
                        Motion::turn(&self.pose, degrees, self.config.rotation_speed)
                    }
                };
                self.step = Step::Moving {
                    instruction,
                    motion,
                };
            }
            Err(reason) => {
                let error = RobotError::UnknownInstruction(command.to_string());
                tracing::error!(%reason, "{}", error);
                self.step = Step::Pausing {
                    remaining: self.config.command_pause,
                };
            }
        }
    }

    fn log_completed(&self, instruction: Instruction) {
        match instruction {
            Instruction::MoveForward { distance } => tracing::info!(
                "Moved forward {} units to position: {:?}",
                distance,
                self.pose.position
            ),
            Instruction::Rotate { degrees } => tracing::info!(
                "Rotated {} degrees. New heading: {:.1}",
                degrees,
                self.pose.heading_degrees()
            ),
        }
    }

    fn finish(&mut self, outcome: RunOutcome) {
        self.sequence.clear();
        self.step = Step::Ready;
        self.state = ExecutionState::Idle;
        self.velocity = Vec3::ZERO;
        self.last_outcome = Some(outcome);
        self.events.push(ExecutionEvent::ExecutionFinished);
        match outcome {
            RunOutcome::Completed => tracing::info!("Command execution completed!"),
            _ => tracing::info!(?outcome, "Command execution ended early"),
        }
    }
}
