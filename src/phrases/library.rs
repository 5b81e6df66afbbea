//! Hand-authored movement phrases
//!
//! A phrase is a short run of commands a fencer would actually perform
//! together. Random drills are built by chaining phrases rather than
//! drawing single commands, which keeps the footwork natural.

use serde::{Deserialize, Serialize};

use crate::commands::CommandCatalog;
use crate::core::error::{DrillError, Result};
use crate::core::types::{CommandId, Difficulty};

/// Base weight for phrases that end in a lunge and recovery.
/// Keeps remise from dominating long drills.
pub const ATTACK_PHRASE_WEIGHT: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phrase {
    pub id: String,
    pub name: String,
    pub commands: Vec<CommandId>,
    /// Declared total position change; checked by [`PhraseLibrary::verify`]
    pub net_movement: f32,
    pub difficulty: Difficulty,
    pub weight: f32,
}

impl Phrase {
    pub fn new(
        id: &str,
        name: &str,
        commands: Vec<CommandId>,
        net_movement: f32,
        difficulty: Difficulty,
    ) -> Self {
        let weight = if ends_with_lunge_recovery(&commands) {
            ATTACK_PHRASE_WEIGHT
        } else {
            1.0
        };
        Self {
            id: id.to_string(),
            name: name.to_string(),
            commands,
            net_movement,
            difficulty,
            weight,
        }
    }

    pub fn computed_movement(&self, catalog: &CommandCatalog) -> f32 {
        self.commands.iter().map(|&c| catalog.position_effect(c)).sum()
    }
}

fn ends_with_lunge_recovery(commands: &[CommandId]) -> bool {
    matches!(
        commands,
        [.., last_but_one, last] if last_but_one.is_lunge() && last.is_recovery()
    )
}

#[derive(Debug, Clone)]
pub struct PhraseLibrary {
    phrases: Vec<Phrase>,
}

impl PhraseLibrary {
    pub fn standard() -> Self {
        use CommandId::*;
        use Difficulty::*;

        let phrases = vec![
            Phrase::new("simple_advance", "Simple Advance", vec![Marche, Marche], 2.0, Beginner),
            Phrase::new("simple_retreat", "Simple Retreat", vec![Rompe, Rompe], -2.0, Beginner),
            Phrase::new(
                "footwork_basic",
                "Basic Footwork",
                vec![Marche, Rompe, Marche, Rompe],
                0.0,
                Beginner,
            ),
            Phrase::new(
                "advance_attack",
                "Advance Attack",
                vec![Marche, Marche, Fendez, Remise],
                2.0,
                Intermediate,
            ),
            Phrase::new(
                "retreat_counter",
                "Retreat Counter",
                vec![Rompe, Rompe, Marche, Fendez, Remise],
                -1.0,
                Intermediate,
            ),
            Phrase::new(
                "prep_attack",
                "Prep Attack",
                vec![Allongez, Fendez, Remise],
                0.0,
                Intermediate,
            ),
            Phrase::new(
                "distance_adjust",
                "Distance Adjust",
                vec![Marche, Marche, Rompe],
                1.0,
                Intermediate,
            ),
            Phrase::new(
                "retreat_distance",
                "Retreat Distance",
                vec![Rompe, Rompe, Marche],
                -1.0,
                Intermediate,
            ),
            Phrase::new("bond_drill", "Bond Drill", vec![BondAvant, BondArriere], 0.0, Advanced),
            Phrase::new(
                "aggressive_advance",
                "Aggressive Advance",
                vec![BondAvant, Marche, Fendez, Remise],
                2.5,
                Advanced,
            ),
            Phrase::new(
                "defensive_retreat",
                "Defensive Retreat",
                vec![BondArriere, Rompe, Rompe],
                -3.5,
                Advanced,
            ),
            Phrase::new(
                "balancez_attack",
                "Balancez Attack",
                vec![Balancez, Marche, Fendez, Remise],
                1.0,
                Advanced,
            ),
        ];

        Self { phrases }
    }

    pub fn new(phrases: Vec<Phrase>) -> Self {
        Self { phrases }
    }

    /// Phrases at or below the given tier
    pub fn phrases_for(&self, difficulty: Difficulty) -> Vec<&Phrase> {
        self.phrases
            .iter()
            .filter(|p| p.difficulty <= difficulty)
            .collect()
    }

    /// Same as [`phrases_for`](Self::phrases_for) for a raw tag.
    /// Unknown tags get the beginner tier.
    pub fn phrases_for_tag(&self, tag: &str) -> Vec<&Phrase> {
        self.phrases_for(Difficulty::from_tag(tag))
    }

    pub fn get(&self, id: &str) -> Option<&Phrase> {
        self.phrases.iter().find(|p| p.id == id)
    }

    pub fn all(&self) -> &[Phrase] {
        &self.phrases
    }

    /// Check every phrase against the catalog.
    ///
    /// Fails on the first phrase whose declared movement does not match the
    /// sum of its commands, or that uses a command the catalog lacks.
    pub fn verify(&self, catalog: &CommandCatalog) -> Result<()> {
        for phrase in &self.phrases {
            if let Some(missing) = phrase.commands.iter().find(|&&c| !catalog.contains(c)) {
                return Err(DrillError::InvalidArgument(format!(
                    "phrase {} uses unknown command {}",
                    phrase.id, missing
                )));
            }
            let computed = phrase.computed_movement(catalog);
            if computed != phrase.net_movement {
                return Err(DrillError::InvalidArgument(format!(
                    "phrase {} declares net movement {} but its commands sum to {}",
                    phrase.id, phrase.net_movement, computed
                )));
            }
        }
        Ok(())
    }
}

impl Default for PhraseLibrary {
    fn default() -> Self {
        Self::standard()
    }
}
