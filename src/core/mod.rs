pub mod config;
pub mod error;
pub mod types;

pub use config::DrillSettings;
pub use error::{DrillError, Result};
pub use types::{CommandId, Difficulty, Direction, Weapon};
