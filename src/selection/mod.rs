//! Constraint and selection engine
//!
//! Decides the next command (or phrase) from history, last command,
//! weapon and position.

pub mod constraints;
pub mod engine;
pub mod history;
pub mod phrase_select;
pub mod transitions;

pub use constraints::{
    count_consecutive_direction, forced_successor, is_wall_risk, post_command_delay,
    JUMP_DELAY_MULTIPLIER, WALL_THRESHOLD,
};
pub use engine::{apply_weapon_weights, weighted_choice, Selection, SelectionEngine, SelectionTier};
pub use history::CommandHistory;
pub use phrase_select::{balanced_weight, select_balanced_phrase};
pub use transitions::{TransitionRule, TransitionTable};
