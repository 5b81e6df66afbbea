//! One-dimensional position of the trainee relative to the starting guard
//!
//! Positive = toward the opponent, negative = away. The value only exists to
//! keep long random drills from running off the end of the piste.

use serde::{Deserialize, Serialize};

use crate::commands::CommandCatalog;
use crate::core::types::{CommandId, Direction};

/// Beyond this, selection is biased back toward the origin
pub const POSITION_SOFT_LIMIT: f32 = 3.0;

/// Beyond this, selection is forced back toward the origin
pub const POSITION_HARD_LIMIT: f32 = 5.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionTracker {
    position: f32,
}

impl PositionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn apply_command(&mut self, catalog: &CommandCatalog, id: CommandId) {
        self.position += catalog.position_effect(id);
    }

    /// Back to the initial en garde position
    pub fn reset(&mut self) {
        self.position = 0.0;
    }

    /// Direction the trainee should be steered toward
    pub fn bias(&self) -> Direction {
        bias_for(self.position)
    }
}

pub fn bias_for(position: f32) -> Direction {
    if position > POSITION_SOFT_LIMIT {
        Direction::Backward
    } else if position < -POSITION_SOFT_LIMIT {
        Direction::Forward
    } else {
        Direction::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CommandId::*;

    fn apply_all(tracker: &mut PositionTracker, commands: &[CommandId]) {
        let catalog = CommandCatalog::standard();
        for &cmd in commands {
            tracker.apply_command(&catalog, cmd);
        }
    }

    #[test]
    fn test_initial_position_is_zero() {
        assert_eq!(PositionTracker::new().position(), 0.0);
    }

    #[test]
    fn test_accumulates_forward_and_backward() {
        let mut tracker = PositionTracker::new();
        apply_all(&mut tracker, &[Marche, Marche, Marche]);
        assert_eq!(tracker.position(), 3.0);
        apply_all(&mut tracker, &[Rompe, BondArriere]);
        assert_eq!(tracker.position(), 0.5);
    }

    #[test]
    fn test_lunge_cycle_returns_to_start() {
        let mut tracker = PositionTracker::new();
        apply_all(&mut tracker, &[Fendez]);
        assert_eq!(tracker.position(), 2.0);
        apply_all(&mut tracker, &[Remise]);
        assert_eq!(tracker.position(), 0.0);
    }

    #[test]
    fn test_neutral_commands_do_not_move() {
        let mut tracker = PositionTracker::new();
        apply_all(&mut tracker, &[EnGarde, Allongez, Balancez, Halte]);
        assert_eq!(tracker.position(), 0.0);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut tracker = PositionTracker::new();
        apply_all(&mut tracker, &[Fleche, Marche, BondAvant]);
        tracker.reset();
        assert_eq!(tracker.position(), 0.0);
        tracker.reset();
        assert_eq!(tracker.position(), 0.0);
    }

    #[test]
    fn test_bias_thresholds() {
        assert_eq!(bias_for(0.0), Direction::Neutral);
        assert_eq!(bias_for(3.0), Direction::Neutral);
        assert_eq!(bias_for(-3.0), Direction::Neutral);
        assert_eq!(bias_for(3.5), Direction::Backward);
        assert_eq!(bias_for(-3.5), Direction::Forward);

        let mut tracker = PositionTracker::new();
        apply_all(&mut tracker, &[Marche, Marche, Marche, Marche]);
        assert_eq!(tracker.bias(), Direction::Backward);
    }
}
