//! Weapon profiles
//!
//! Each weapon changes the feel of a drill in three ways: overall tempo,
//! how often individual commands come up, and which extra commands exist.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{CommandId, Weapon};

/// Weight used for commands a profile does not mention
pub const DEFAULT_COMMAND_WEIGHT: f32 = 1.0;

/// Weapon-specific tuning applied to command selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponProfile {
    pub weapon: Weapon,
    /// Scales commands per minute (>1 = faster)
    pub tempo_multiplier: f32,
    /// Sparse overrides; 0.0 removes the command entirely
    pub command_weights: AHashMap<CommandId, f32>,
    /// Commands only this weapon adds to the candidate pool
    pub additional_commands: Vec<CommandId>,
}

impl WeaponProfile {
    pub fn new(
        weapon: Weapon,
        tempo_multiplier: f32,
        weights: &[(CommandId, f32)],
        additional_commands: &[CommandId],
    ) -> Self {
        debug_assert!(weights.iter().all(|(_, w)| *w >= 0.0));
        Self {
            weapon,
            tempo_multiplier,
            command_weights: weights.iter().copied().collect(),
            additional_commands: additional_commands.to_vec(),
        }
    }

    pub fn weight(&self, id: CommandId) -> f32 {
        self.command_weights
            .get(&id)
            .copied()
            .unwrap_or(DEFAULT_COMMAND_WEIGHT)
    }

    pub fn excludes(&self, id: CommandId) -> bool {
        self.weight(id) <= 0.0
    }
}

/// The closed table of weapon profiles
#[derive(Debug, Clone)]
pub struct WeaponTable {
    foil: WeaponProfile,
    epee: WeaponProfile,
    sabre: WeaponProfile,
}

impl WeaponTable {
    pub fn new(foil: WeaponProfile, epee: WeaponProfile, sabre: WeaponProfile) -> Self {
        Self { foil, epee, sabre }
    }

    pub fn standard() -> Self {
        use CommandId::*;

        Self {
            foil: WeaponProfile::new(
                Weapon::Foil,
                1.0,
                &[(Balancez, 0.3), (BondAvant, 0.8), (BondArriere, 0.8)],
                &[],
            ),
            epee: WeaponProfile::new(
                Weapon::Epee,
                0.8,
                &[
                    (Balancez, 1.5),
                    (Allongez, 1.2),
                    (BondAvant, 0.5),
                    (BondArriere, 0.5),
                ],
                &[],
            ),
            sabre: WeaponProfile::new(
                Weapon::Sabre,
                1.3,
                &[
                    (Balancez, 0.0),
                    (Allongez, 0.8),
                    (BondAvant, 1.5),
                    (BondArriere, 1.0),
                ],
                &[Fleche],
            ),
        }
    }

    pub fn profile_for(&self, weapon: Weapon) -> &WeaponProfile {
        match weapon {
            Weapon::Foil => &self.foil,
            Weapon::Epee => &self.epee,
            Weapon::Sabre => &self.sabre,
        }
    }

    /// Resolve a weapon tag such as `"sabre"`.
    pub fn profile_for_tag(&self, tag: &str) -> Result<&WeaponProfile> {
        let weapon: Weapon = tag.parse()?;
        Ok(self.profile_for(weapon))
    }
}

impl Default for WeaponTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tempo_multipliers() {
        let table = WeaponTable::standard();
        assert_eq!(table.profile_for(Weapon::Foil).tempo_multiplier, 1.0);
        assert_eq!(table.profile_for(Weapon::Epee).tempo_multiplier, 0.8);
        assert_eq!(table.profile_for(Weapon::Sabre).tempo_multiplier, 1.3);
    }

    #[test]
    fn test_balancez_weights() {
        let table = WeaponTable::standard();
        assert_eq!(table.profile_for(Weapon::Foil).weight(CommandId::Balancez), 0.3);
        assert_eq!(table.profile_for(Weapon::Epee).weight(CommandId::Balancez), 1.5);
        assert!(table.profile_for(Weapon::Sabre).excludes(CommandId::Balancez));
    }

    #[test]
    fn test_unlisted_command_has_default_weight() {
        let table = WeaponTable::standard();
        for weapon in Weapon::ALL {
            assert_eq!(table.profile_for(weapon).weight(CommandId::Marche), 1.0);
        }
    }

    #[test]
    fn test_only_sabre_adds_fleche() {
        let table = WeaponTable::standard();
        assert!(table.profile_for(Weapon::Foil).additional_commands.is_empty());
        assert!(table.profile_for(Weapon::Epee).additional_commands.is_empty());
        assert_eq!(
            table.profile_for(Weapon::Sabre).additional_commands,
            vec![CommandId::Fleche]
        );
    }

    #[test]
    fn test_weights_are_non_negative() {
        let table = WeaponTable::standard();
        for weapon in Weapon::ALL {
            assert!(table.profile_for(weapon).command_weights.values().all(|w| *w >= 0.0));
        }
    }

    #[test]
    fn test_profile_for_tag() {
        let table = WeaponTable::standard();
        assert_eq!(table.profile_for_tag("epee").unwrap().weapon, Weapon::Epee);
        assert!(table.profile_for_tag("rapier").unwrap_err().is_not_found());
    }
}
