//! Obstacles: rocks, trees, walls and barriers that block the robot

use crate::core::types::Seconds;
use crate::robot::contact::{HitOutcome, HitReceiver};
use serde::{Deserialize, Serialize};

/// How long an obstacle flashes after being hit
pub const HIT_FLASH_DURATION: Seconds = 0.2;

/// Hits a destructible obstacle absorbs by default
pub const DEFAULT_HITS_TO_DESTROY: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    #[default]
    Rock,
    Tree,
    Wall,
    Barrier,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub destructible: bool,
    pub hits_to_destroy: u32,
    hits: u32,
    flash_remaining: Seconds,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind) -> Self {
        Self {
            kind,
            destructible: false,
            hits_to_destroy: DEFAULT_HITS_TO_DESTROY,
            hits: 0,
            flash_remaining: 0.0,
        }
    }

    pub fn destructible(mut self, hits_to_destroy: u32) -> Self {
        self.destructible = true;
        self.hits_to_destroy = hits_to_destroy.max(1);
        self
    }

    pub fn hits(&self) -> u32 {
        self.hits
    }

    /// Whether the hit flash is showing
    pub fn is_flashing(&self) -> bool {
        self.flash_remaining > 0.0
    }

    /// Count down the hit flash
    pub fn update(&mut self, dt: Seconds) {
        self.flash_remaining = (self.flash_remaining - dt).max(0.0);
    }

    fn flash(&mut self) {
        self.flash_remaining = HIT_FLASH_DURATION;
    }
}

impl HitReceiver for Obstacle {
    fn notify_hit(&mut self) -> HitOutcome {
        if !self.destructible {
            tracing::info!("Robot collided with {:?} (indestructible)", self.kind);
            self.flash();
            return HitOutcome::Deflected;
        }

        self.hits += 1;
        tracing::info!("{:?} hit! ({}/{})", self.kind, self.hits, self.hits_to_destroy);
        if self.hits >= self.hits_to_destroy {
            tracing::info!("{:?} destroyed!", self.kind);
            return HitOutcome::Destroyed;
        }

        self.flash();
        HitOutcome::Damaged {
            hits: self.hits,
            hits_to_destroy: self.hits_to_destroy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indestructible_only_flashes() {
        let mut rock = Obstacle::new(ObstacleKind::Rock);
        for _ in 0..5 {
            assert_eq!(rock.notify_hit(), HitOutcome::Deflected);
        }
        assert_eq!(rock.hits(), 0);
        assert!(rock.is_flashing());
    }

    #[test]
    fn test_destructible_breaks_at_threshold() {
        let mut barrier = Obstacle::new(ObstacleKind::Barrier).destructible(3);
        assert_eq!(
            barrier.notify_hit(),
            HitOutcome::Damaged {
                hits: 1,
                hits_to_destroy: 3
            }
        );
        assert_eq!(
            barrier.notify_hit(),
            HitOutcome::Damaged {
                hits: 2,
                hits_to_destroy: 3
            }
        );
        assert_eq!(barrier.notify_hit(), HitOutcome::Destroyed);
    }

    #[test]
    fn test_flash_wears_off() {
        let mut tree = Obstacle::new(ObstacleKind::Tree);
        tree.notify_hit();
        tree.update(0.1);
        assert!(tree.is_flashing());
        tree.update(0.15);
        assert!(!tree.is_flashing());
    }

    #[test]
    fn test_zero_threshold_is_clamped() {
        let mut wall = Obstacle::new(ObstacleKind::Wall).destructible(0);
        assert_eq!(wall.hits_to_destroy, 1);
        assert_eq!(wall.notify_hit(), HitOutcome::Destroyed);
    }
}
