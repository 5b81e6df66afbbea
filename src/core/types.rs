//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::DrillError;

/// Stable identifier for every spoken command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandId {
    EnGarde,
    Marche,
    Rompe,
    Allongez,
    Fendez,
    Remise,
    Balancez,
    DoubleMarche,
    BondAvant,
    BondArriere,
    Fleche,
    Halte,
}

impl CommandId {
    pub const ALL: [CommandId; 12] = [
        CommandId::EnGarde,
        CommandId::Marche,
        CommandId::Rompe,
        CommandId::Allongez,
        CommandId::Fendez,
        CommandId::Remise,
        CommandId::Balancez,
        CommandId::DoubleMarche,
        CommandId::BondAvant,
        CommandId::BondArriere,
        CommandId::Fleche,
        CommandId::Halte,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CommandId::EnGarde => "en_garde",
            CommandId::Marche => "marche",
            CommandId::Rompe => "rompe",
            CommandId::Allongez => "allongez",
            CommandId::Fendez => "fendez",
            CommandId::Remise => "remise",
            CommandId::Balancez => "balancez",
            CommandId::DoubleMarche => "double_marche",
            CommandId::BondAvant => "bond_avant",
            CommandId::BondArriere => "bond_arriere",
            CommandId::Fleche => "fleche",
            CommandId::Halte => "halte",
        }
    }

    /// The lunge. Always answered by [`CommandId::Remise`].
    pub fn is_lunge(&self) -> bool {
        matches!(self, CommandId::Fendez)
    }

    /// Return to guard after a lunge.
    pub fn is_recovery(&self) -> bool {
        matches!(self, CommandId::Remise)
    }

    /// Jumps get a longer pause after them.
    pub fn is_jump(&self) -> bool {
        matches!(self, CommandId::BondAvant | CommandId::BondArriere)
    }

    /// Fixed direction classification used by wall avoidance.
    ///
    /// Coarser than the position effect map: the lunge and flèche move the
    /// fencer but do not count toward a streak.
    pub fn direction(&self) -> Direction {
        match self {
            CommandId::Marche | CommandId::DoubleMarche | CommandId::BondAvant => {
                Direction::Forward
            }
            CommandId::Rompe | CommandId::BondArriere => Direction::Backward,
            _ => Direction::Neutral,
        }
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandId {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommandId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| DrillError::not_found("command", s))
    }
}

/// The three competitive weapons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weapon {
    #[default]
    Foil,
    Epee,
    Sabre,
}

impl Weapon {
    pub const ALL: [Weapon; 3] = [Weapon::Foil, Weapon::Epee, Weapon::Sabre];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weapon::Foil => "foil",
            Weapon::Epee => "epee",
            Weapon::Sabre => "sabre",
        }
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weapon {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "foil" => Ok(Weapon::Foil),
            "epee" => Ok(Weapon::Epee),
            "sabre" => Ok(Weapon::Sabre),
            other => Err(DrillError::not_found("weapon", other)),
        }
    }
}

/// Movement direction relative to the opponent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
    Neutral,
}

/// Skill tier. Tiers are cumulative: each includes everything below it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Parse a tier tag. Unknown tags fall back to beginner rather than failing.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "intermediate" => Difficulty::Intermediate,
            "advanced" => Difficulty::Advanced,
            _ => Difficulty::Beginner,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl From<String> for Difficulty {
    fn from(tag: String) -> Self {
        Difficulty::from_tag(&tag)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
