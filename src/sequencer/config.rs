//! Per-mode training configuration
//!
//! Supplied by the session layer and treated as already validated.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::error::Result;
use crate::core::types::{Difficulty, Weapon};
use crate::weapons::WeaponTable;

/// Alternate between the two commands of a named drill pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedPairConfig {
    pub pair_id: String,
    pub repetitions: u32,
    pub tempo_bpm: u32,
    pub weapon: Weapon,
}

impl Default for FixedPairConfig {
    fn default() -> Self {
        Self {
            pair_id: "marche_rompe".to_string(),
            repetitions: 10,
            tempo_bpm: 60,
            weapon: Weapon::Foil,
        }
    }
}

/// Replay a preset combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub pattern_id: String,
    pub repetitions: u32,
    pub tempo_bpm: u32,
    pub weapon: Weapon,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            pattern_id: "A".to_string(),
            repetitions: 5,
            tempo_bpm: 60,
            weapon: Weapon::Foil,
        }
    }
}

/// Phrase-based random drill bounded by wall-clock time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationConfig {
    pub difficulty: Difficulty,
    pub duration_seconds: u64,
    pub min_interval_ms: u64,
    pub max_interval_ms: u64,
    pub weapon: Weapon,
}

impl Default for DurationConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Beginner,
            duration_seconds: 60,
            min_interval_ms: 1000,
            max_interval_ms: 3000,
            weapon: Weapon::Foil,
        }
    }
}

impl DurationConfig {
    pub fn mean_interval_ms(&self) -> f32 {
        (self.min_interval_ms + self.max_interval_ms.max(self.min_interval_ms)) as f32 / 2.0
    }
}

/// Work/rest intervals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntervalConfig {
    pub work_seconds: u64,
    pub rest_seconds: u64,
    pub sets: u32,
    pub tempo_bpm: u32,
    pub weapon: Weapon,
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self {
            work_seconds: 30,
            rest_seconds: 15,
            sets: 5,
            tempo_bpm: 90,
            weapon: Weapon::Foil,
        }
    }
}

impl IntervalConfig {
    /// Commands that fit into one work phase at the nominal tempo
    pub fn work_command_count(&self) -> usize {
        (self.work_seconds * self.tempo_bpm as u64 / 60) as usize
    }
}

/// One training run. Dispatch is an exhaustive match on the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ModeConfig {
    FixedPair(FixedPairConfig),
    Pattern(PatternConfig),
    Duration(DurationConfig),
    Interval(IntervalConfig),
}

impl ModeConfig {
    /// Load a mode from TOML, selected by its `mode` key
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn weapon(&self) -> Weapon {
        match self {
            ModeConfig::FixedPair(c) => c.weapon,
            ModeConfig::Pattern(c) => c.weapon,
            ModeConfig::Duration(c) => c.weapon,
            ModeConfig::Interval(c) => c.weapon,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModeConfig::FixedPair(_) => "fixed_pair",
            ModeConfig::Pattern(_) => "pattern",
            ModeConfig::Duration(_) => "duration",
            ModeConfig::Interval(_) => "interval",
        }
    }
}

impl Default for ModeConfig {
    fn default() -> Self {
        ModeConfig::FixedPair(FixedPairConfig::default())
    }
}

/// Seconds between commands at a tempo, scaled by the weapon
pub fn tempo_interval(tempo_bpm: u32, weapon: Weapon, weapons: &WeaponTable) -> Duration {
    let multiplier = weapons.profile_for(weapon).tempo_multiplier;
    let per_minute = tempo_bpm.max(1) as f32 * multiplier;
    Duration::from_secs_f32(60.0 / per_minute)
}
