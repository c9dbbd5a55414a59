//! Tick system - drives the robot and feeds world contacts back to it
//!
//! Each tick is split into sub-steps short enough that the robot travels at
//! most its collision radius per sub-step. Each sub-step:
//! executor motion -> object animation -> contact detection -> collision /
//! trigger handling -> held obstacle contact check
//!
//! A motion in flight halts on any obstacle it overlaps, whether the contact
//! just began or was already there when the motion started.

use crate::core::config::RobotConfig;
use crate::core::error::Result;
use crate::core::types::{ObjectId, Pose, Seconds};
use crate::robot::contact::HitReceiver;
use crate::robot::events::ExecutionEvent;
use crate::robot::executor::{ExecutionState, Executor, RunOutcome};
use crate::world::collision::{ContactTracker, WorldSignal};
use crate::world::loader::LevelDefinition;
use crate::world::objects::WorldObjects;
use serde::Serialize;

/// Everything that happened during one tick
#[derive(Debug, Clone, Default, Serialize)]
pub struct TickReport {
    pub events: Vec<ExecutionEvent>,
    pub signals: Vec<WorldSignal>,
    /// Collectibles picked up and removed
    pub collected: Vec<ObjectId>,
    /// Obstacles broken and removed
    pub destroyed: Vec<ObjectId>,
}

impl TickReport {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
            && self.signals.is_empty()
            && self.collected.is_empty()
            && self.destroyed.is_empty()
    }
}

/// Aggregate of a run driven to completion
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub elapsed: Seconds,
    pub outcome: Option<RunOutcome>,
    /// True when the time cap stopped the run before it finished
    pub timed_out: bool,
    pub events: Vec<ExecutionEvent>,
    pub collected: Vec<ObjectId>,
    pub destroyed: Vec<ObjectId>,
    pub final_pose: Pose,
}

/// One robot in one level
pub struct Simulation {
    level_name: String,
    world: WorldObjects,
    executor: Executor,
    contacts: ContactTracker,
    collision_radius: f32,
    /// Longest sub-step that keeps travel within the collision radius
    max_substep: Seconds,
    collected_total: usize,
}

impl Simulation {
    pub fn new(config: &RobotConfig, level: &LevelDefinition) -> Self {
        Self::from_parts(
            config,
            &level.name,
            level.build_world(),
            level.spawn_pose(),
        )
    }

    pub fn from_parts(
        config: &RobotConfig,
        level_name: &str,
        world: WorldObjects,
        spawn: Pose,
    ) -> Self {
        Self {
            level_name: level_name.to_string(),
            world,
            executor: Executor::new(config.clone(), spawn),
            contacts: ContactTracker::new(),
            collision_radius: config.collision_radius,
            max_substep: config.collision_radius / config.move_speed,
            collected_total: 0,
        }
    }

    pub fn level_name(&self) -> &str {
        &self.level_name
    }

    pub fn world(&self) -> &WorldObjects {
        &self.world
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    pub fn pose(&self) -> &Pose {
        self.executor.pose()
    }

    pub fn state(&self) -> ExecutionState {
        self.executor.state()
    }

    pub fn is_running(&self) -> bool {
        self.executor.is_running()
    }

    /// Collectibles picked up since the level was loaded
    pub fn collected_total(&self) -> usize {
        self.collected_total
    }

    /// Submit normalized instruction lines for execution
    pub fn run<S: AsRef<str>>(&mut self, commands: &[S]) -> Result<()> {
        self.executor.run(commands)
    }

    /// Return the robot to its spawn pose and stop any run
    ///
    /// Objects already collected or destroyed stay gone.
    pub fn reset(&mut self) {
        self.executor.reset();
        self.contacts.clear();
    }

    /// Notifications not yet delivered by a tick
    pub fn drain_events(&mut self) -> Vec<ExecutionEvent> {
        self.executor.drain_events()
    }

    pub fn tick(&mut self, dt: Seconds) -> TickReport {
        let mut report = TickReport::default();
        let mut remaining = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        loop {
            let step = if self.executor.is_running()
                && self.max_substep.is_finite()
                && self.max_substep > 0.0
            {
                remaining.min(self.max_substep)
            } else {
                remaining
            };
            self.substep(step, &mut report);
            remaining -= step;
            if remaining <= 0.0 {
                break;
            }
        }

        report.events = self.executor.drain_events();
        report
    }

    fn substep(&mut self, dt: Seconds, report: &mut TickReport) {
        self.executor.tick(dt);
        self.world.update(dt);

        let position = self.executor.pose().position;
        let signals = self
            .contacts
            .update(&self.world, position, self.collision_radius);

        for signal in &signals {
            match signal {
                WorldSignal::CollisionEnter { id, tag } => self.collide(*id, tag, report),
                WorldSignal::TriggerEnter { id, tag } => {
                    if self.executor.on_trigger_enter(tag) {
                        self.world.remove(*id);
                        self.contacts.forget(*id);
                        self.collected_total += 1;
                        report.collected.push(*id);
                    }
                }
            }
        }
        report.signals.extend(signals);

        // Contacts that began while paused or idle still block the next motion
        for id in self.contacts.touching() {
            if !self.executor.is_moving() {
                break;
            }
            let tag = match self.world.get(id) {
                Some(object) if !object.trigger => object.tag.clone(),
                _ => continue,
            };
            self.collide(id, &tag, report);
        }
    }

    fn collide(&mut self, id: ObjectId, tag: &str, report: &mut TickReport) {
        let obstacle = self
            .world
            .obstacle_mut(id)
            .map(|obstacle| obstacle as &mut dyn HitReceiver);
        let response = self.executor.on_collision_enter(tag, obstacle);
        if response.destroyed_obstacle() {
            self.world.remove(id);
            self.contacts.forget(id);
            report.destroyed.push(id);
        }
    }

    /// Tick at a fixed step until the run ends or `max_seconds` pass
    pub fn run_to_completion(&mut self, dt: Seconds, max_seconds: Seconds) -> RunSummary {
        let mut summary = RunSummary {
            ticks: 0,
            elapsed: 0.0,
            outcome: None,
            timed_out: false,
            events: Vec::new(),
            collected: Vec::new(),
            destroyed: Vec::new(),
            final_pose: *self.pose(),
        };

        loop {
            let report = self.tick(dt);
            summary.ticks += 1;
            summary.elapsed += dt;
            summary.events.extend(report.events);
            summary.collected.extend(report.collected);
            summary.destroyed.extend(report.destroyed);

            if !self.is_running() {
                break;
            }
            if summary.elapsed >= max_seconds {
                tracing::warn!(
                    elapsed = summary.elapsed,
                    "Run did not finish within the time limit"
                );
                summary.timed_out = true;
                break;
            }
        }

        summary.outcome = self.executor.last_outcome();
        summary.final_pose = *self.pose();
        summary
    }
}
