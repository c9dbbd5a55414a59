//! What the executor needs to know about things it bumps into

use serde::{Deserialize, Serialize};

/// Result of an obstacle absorbing a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum HitOutcome {
    /// Indestructible; only flashes
    Deflected,
    /// Destructible and still standing
    Damaged { hits: u32, hits_to_destroy: u32 },
    /// Reached its hit threshold and must be removed
    Destroyed,
}

/// Capability exposed by obstacles to the executor
pub trait HitReceiver {
    fn notify_hit(&mut self) -> HitOutcome;
}

/// How the executor reacted to a collision signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionResponse {
    /// Not an obstacle, or no motion was in flight
    Ignored,
    /// The run was halted; carries the obstacle's reaction if one was given
    Halted { hit: Option<HitOutcome> },
}

impl CollisionResponse {
    pub fn destroyed_obstacle(&self) -> bool {
        matches!(
            self,
            CollisionResponse::Halted {
                hit: Some(HitOutcome::Destroyed)
            }
        )
    }
}
