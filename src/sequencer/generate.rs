//! Whole-sequence generation without timing
//!
//! For consumers that want the command list up front rather than a timed
//! event stream.

use rand::Rng;

use crate::commands::DrillTables;
use crate::core::error::Result;
use crate::core::types::{CommandId, Difficulty, Weapon};
use crate::library::DrillLibrary;
use crate::sequencer::config::{FixedPairConfig, IntervalConfig, ModeConfig, PatternConfig};
use crate::sequencer::stream::PhraseStream;

/// A preset pattern repeated `repetitions` times
pub fn generate_combination(config: &PatternConfig, tables: &DrillTables) -> Result<Vec<CommandId>> {
    let pattern = tables.pattern(&config.pattern_id)?;
    Ok(pattern.repeat(config.repetitions as usize))
}

/// First then second command of a pair, once per repetition
pub fn generate_fixed_pair(config: &FixedPairConfig, tables: &DrillTables) -> Result<Vec<CommandId>> {
    let pair = tables.pair(&config.pair_id)?;
    Ok([pair.first, pair.second].repeat(config.repetitions as usize))
}

/// Position-balanced commands drawn phrase by phrase
pub fn generate_random_commands(
    library: &DrillLibrary,
    difficulty: Difficulty,
    count: usize,
    weapon: Weapon,
    rng: &mut impl Rng,
) -> Result<Vec<CommandId>> {
    PhraseStream::new(library, difficulty, weapon).take(count, rng)
}

/// One interval work phase, drawn phrase by phrase from the intermediate
/// tier with fresh position and history
pub fn generate_interval_work_commands(
    config: &IntervalConfig,
    library: &DrillLibrary,
    rng: &mut impl Rng,
) -> Result<Vec<CommandId>> {
    PhraseStream::new(library, Difficulty::Intermediate, config.weapon)
        .take(config.work_command_count(), rng)
}

/// The full command list a mode would play.
///
/// Timed modes estimate their command count: duration divides the run time
/// by the mean interval (scaled by the weapon's tempo), interval multiplies
/// sets by the commands per work phase.
pub fn generate_for_mode(
    config: &ModeConfig,
    library: &DrillLibrary,
    rng: &mut impl Rng,
) -> Result<Vec<CommandId>> {
    match config {
        ModeConfig::FixedPair(c) => generate_fixed_pair(c, &library.tables),
        ModeConfig::Pattern(c) => generate_combination(c, &library.tables),
        ModeConfig::Duration(c) => {
            let multiplier = library.weapons.profile_for(c.weapon).tempo_multiplier;
            let mean_ms = c.mean_interval_ms().max(1.0);
            let count = ((c.duration_seconds * 1000) as f32 / mean_ms * multiplier).round() as usize;
            generate_random_commands(library, c.difficulty, count, c.weapon, rng)
        }
        ModeConfig::Interval(c) => {
            let mut commands = Vec::with_capacity(c.work_command_count() * c.sets as usize);
            for _ in 0..c.sets {
                commands.extend(generate_interval_work_commands(c, library, rng)?);
            }
            Ok(commands)
        }
    }
}
