//! Runtime settings with documented defaults
//!
//! Settings are plain values handed to the sequencer at construction.
//! They can be read from a TOML file and overridden from the environment.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{DrillError, Result};
use crate::selection::constraints::WALL_THRESHOLD;

/// Tunable settings for running drills
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillSettings {
    /// Pause after the opening "en garde" before the first command (ms)
    ///
    /// Gives the trainee time to settle into guard.
    pub ready_pause_ms: u64,

    /// Number of recent commands kept for constraint checks
    ///
    /// Must exceed the wall threshold or streaks can never be detected.
    pub history_window: usize,

    /// Phrases drawn in a row without emitting anything before the
    /// stream falls back to single-command selection
    pub max_empty_phrases: usize,

    /// `tracing` filter directive used by the binary
    pub log_filter: String,

    /// Seed for the command RNG. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for DrillSettings {
    fn default() -> Self {
        Self {
            ready_pause_ms: 2000,
            history_window: 16,
            max_empty_phrases: 32,
            log_filter: "fencing_drill=info".to_string(),
            seed: None,
        }
    }
}

impl DrillSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a TOML file. Missing keys keep their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let settings: DrillSettings = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply environment overrides
    ///
    /// Optional: FENCING_DRILL_SEED (u64)
    /// Optional: FENCING_DRILL_LOG (filter directive)
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(seed) = std::env::var("FENCING_DRILL_SEED") {
            let seed = seed.trim().parse::<u64>().map_err(|_| {
                DrillError::InvalidConfig(format!("FENCING_DRILL_SEED is not a u64: {}", seed))
            })?;
            self.seed = Some(seed);
        }
        if let Ok(filter) = std::env::var("FENCING_DRILL_LOG") {
            self.log_filter = filter;
        }
        Ok(self)
    }

    /// Validate settings for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.history_window <= WALL_THRESHOLD {
            return Err(DrillError::InvalidConfig(format!(
                "history_window ({}) must be greater than the wall threshold ({})",
                self.history_window, WALL_THRESHOLD
            )));
        }

        if self.max_empty_phrases == 0 {
            return Err(DrillError::InvalidConfig(
                "max_empty_phrases must be at least 1".into(),
            ));
        }

        Ok(())
    }
}
