//! Command selection - the layered decision for "what comes next"
//!
//! Rules are applied in strict priority order:
//! 1. Forced transition (lunge → recovery), nothing can override it
//! 2. Weapon filtering, plus the weapon's additional commands
//! 3. Soft transition bias, which short-circuits when it fires
//! 4. Weapon weighting, zero weight removes the command
//! 5. Wall avoidance, with fallback tiers so selection never stalls
//! 6. Weighted random draw

use rand::seq::SliceRandom;
use rand::Rng;

use crate::commands::CommandCatalog;
use crate::core::error::{DrillError, Result};
use crate::core::types::{CommandId, Weapon};
use crate::phrases::Phrase;
use crate::selection::constraints::{forced_successor, is_wall_risk};
use crate::selection::history::CommandHistory;
use crate::selection::phrase_select::select_balanced_phrase;
use crate::selection::transitions::TransitionTable;
use crate::weapons::{WeaponProfile, WeaponTable};

/// Which rule produced a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionTier {
    /// Lunge → recovery
    Forced,
    /// A transition rule fired
    Preferred,
    /// Weighted draw over wall-safe candidates
    Normal,
    /// Every weighted candidate was a wall risk; the wall rule was waived
    WallWaived,
    /// Weighting removed everything; uniform over weapon-filtered candidates
    Unweighted,
    /// Weapon filtering removed everything; uniform over the raw candidates
    Unfiltered,
}

impl SelectionTier {
    pub fn is_degraded(&self) -> bool {
        matches!(
            self,
            SelectionTier::WallWaived | SelectionTier::Unweighted | SelectionTier::Unfiltered
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub command: CommandId,
    pub tier: SelectionTier,
}

/// Stateless selection over borrowed, read-only tables
#[derive(Debug, Clone, Copy)]
pub struct SelectionEngine<'a> {
    catalog: &'a CommandCatalog,
    weapons: &'a WeaponTable,
    transitions: &'a TransitionTable,
}

impl<'a> SelectionEngine<'a> {
    pub fn new(
        catalog: &'a CommandCatalog,
        weapons: &'a WeaponTable,
        transitions: &'a TransitionTable,
    ) -> Self {
        Self { catalog, weapons, transitions }
    }

    pub fn catalog(&self) -> &'a CommandCatalog {
        self.catalog
    }

    pub fn weapons(&self) -> &'a WeaponTable {
        self.weapons
    }

    pub fn transitions(&self) -> &'a TransitionTable {
        self.transitions
    }

    /// Pick the next command from `candidates`.
    ///
    /// Fails only when there is nothing at all to pick from (an empty
    /// candidate set and no weapon additions).
    pub fn select_next(
        &self,
        candidates: &[CommandId],
        history: &CommandHistory,
        last: Option<CommandId>,
        weapon: Weapon,
        rng: &mut impl Rng,
    ) -> Result<CommandId> {
        self.select_next_traced(candidates, history, last, weapon, rng)
            .map(|s| s.command)
    }

    /// [`select_next`](Self::select_next), also reporting which rule decided.
    pub fn select_next_traced(
        &self,
        candidates: &[CommandId],
        history: &CommandHistory,
        last: Option<CommandId>,
        weapon: Weapon,
        rng: &mut impl Rng,
    ) -> Result<Selection> {
        if let Some(forced) = forced_successor(last) {
            return Ok(Selection { command: forced, tier: SelectionTier::Forced });
        }

        let profile = self.weapons.profile_for(weapon);
        let filtered = self.filter_for_weapon(candidates, profile);

        if let Some(last) = last {
            if let Some(preferred) = self.transitions.preferred_next(last, &filtered, rng) {
                return Ok(Selection { command: preferred, tier: SelectionTier::Preferred });
            }
        }

        let weighted = apply_weapon_weights(&filtered, profile);
        let safe: Vec<(CommandId, f32)> = weighted
            .iter()
            .copied()
            .filter(|(cmd, _)| !is_wall_risk(history, *cmd))
            .collect();

        if let Some(command) = weighted_choice(&safe, rng) {
            return Ok(Selection { command, tier: SelectionTier::Normal });
        }

        if let Some(command) = weighted_choice(&weighted, rng) {
            tracing::warn!(
                weapon = %weapon,
                "Degraded selection: every candidate is a wall risk, picked {}",
                command
            );
            return Ok(Selection { command, tier: SelectionTier::WallWaived });
        }

        if let Some(&command) = filtered.choose(rng) {
            tracing::warn!(
                weapon = %weapon,
                "Degraded selection: weighting excluded every candidate, picked {}",
                command
            );
            return Ok(Selection { command, tier: SelectionTier::Unweighted });
        }

        if let Some(&command) = candidates.choose(rng) {
            tracing::warn!(
                weapon = %weapon,
                "Degraded selection: no candidate valid for weapon, picked {}",
                command
            );
            return Ok(Selection { command, tier: SelectionTier::Unfiltered });
        }

        Err(DrillError::InvalidArgument(
            "no commands available for selection".into(),
        ))
    }

    /// Drop commands the weapon cannot use, then add the weapon's own extras.
    pub fn filter_for_weapon(
        &self,
        candidates: &[CommandId],
        profile: &WeaponProfile,
    ) -> Vec<CommandId> {
        let mut result: Vec<CommandId> = candidates
            .iter()
            .copied()
            .filter(|&cmd| self.catalog.is_valid_for_weapon(cmd, profile.weapon))
            .collect();

        for &extra in &profile.additional_commands {
            if !result.contains(&extra) {
                result.push(extra);
            }
        }
        result
    }

    /// Can this weapon ever emit `id`? Checks both validity and weight.
    pub fn allowed_for_weapon(&self, id: CommandId, weapon: Weapon) -> bool {
        self.catalog.is_valid_for_weapon(id, weapon)
            && !self.weapons.profile_for(weapon).excludes(id)
    }

    /// Position-aware phrase choice
    pub fn select_phrase<'p>(
        &self,
        position: f32,
        phrases: &[&'p Phrase],
        rng: &mut impl Rng,
    ) -> Result<&'p Phrase> {
        select_balanced_phrase(position, phrases, rng)
    }
}

/// Attach weapon weights, removing zero-weight commands
pub fn apply_weapon_weights(
    commands: &[CommandId],
    profile: &WeaponProfile,
) -> Vec<(CommandId, f32)> {
    commands
        .iter()
        .map(|&cmd| (cmd, profile.weight(cmd)))
        .filter(|(_, weight)| *weight > 0.0)
        .collect()
}

/// Weighted random draw. `None` for an empty slice.
pub fn weighted_choice(weighted: &[(CommandId, f32)], rng: &mut impl Rng) -> Option<CommandId> {
    if weighted.is_empty() {
        return None;
    }
    match weighted.choose_weighted(rng, |(_, w)| *w) {
        Ok((cmd, _)) => Some(*cmd),
        Err(_) => weighted.choose(rng).map(|(cmd, _)| *cmd),
    }
}
