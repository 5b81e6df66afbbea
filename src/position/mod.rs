pub mod tracker;

pub use tracker::{bias_for, PositionTracker, POSITION_HARD_LIMIT, POSITION_SOFT_LIMIT};
