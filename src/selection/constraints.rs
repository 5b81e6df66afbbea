//! Local sequencing constraints
//!
//! Rules here only look at the last command and the recent history. They
//! never consult the position tracker.

use crate::core::types::{CommandId, Direction};
use crate::selection::history::CommandHistory;

/// Streak length at which another same-direction command is refused
/// (a fifth step in one direction runs the fencer into the wall).
pub const WALL_THRESHOLD: usize = 4;

/// Pause multiplier after jumps
pub const JUMP_DELAY_MULTIPLIER: f32 = 1.5;

/// A lunge must be answered by a recovery, nothing else.
pub fn forced_successor(last: Option<CommandId>) -> Option<CommandId> {
    match last {
        Some(cmd) if cmd.is_lunge() => Some(CommandId::Remise),
        _ => None,
    }
}

/// Count same-direction commands at the tail of the history.
///
/// Neutral commands are skipped over: they neither extend nor end a streak.
/// The opposite direction ends it.
pub fn count_consecutive_direction(history: &CommandHistory, direction: Direction) -> usize {
    let mut count = 0;
    for cmd in history.iter_recent() {
        let dir = cmd.direction();
        if dir == direction {
            count += 1;
        } else if dir != Direction::Neutral {
            break;
        }
    }
    count
}

/// Would picking `proposed` make the streak reach one past the threshold?
pub fn is_wall_risk(history: &CommandHistory, proposed: CommandId) -> bool {
    let direction = proposed.direction();
    if direction == Direction::Neutral {
        return false;
    }
    count_consecutive_direction(history, direction) >= WALL_THRESHOLD
}

/// Delay after a command, stretched for jumps
pub fn post_command_delay(id: CommandId, base_secs: f32) -> f32 {
    if id.is_jump() {
        base_secs * JUMP_DELAY_MULTIPLIER
    } else {
        base_secs
    }
}
