//! Fixed command groupings: difficulty sets, drill pairs and combination patterns

use ahash::AHashMap;

use crate::core::error::{DrillError, Result};
use crate::core::types::{CommandId, Difficulty};

use CommandId::*;

/// Commands available at each skill tier
#[derive(Debug, Clone)]
pub struct CommandSets {
    beginner: Vec<CommandId>,
    intermediate: Vec<CommandId>,
    advanced: Vec<CommandId>,
}

impl CommandSets {
    pub fn standard() -> Self {
        Self {
            beginner: vec![Marche, Rompe],
            intermediate: vec![Marche, Rompe, Fendez, Remise],
            advanced: vec![Marche, Rompe, Fendez, Remise, BondAvant, BondArriere, Balancez],
        }
    }

    pub fn for_difficulty(&self, difficulty: Difficulty) -> &[CommandId] {
        match difficulty {
            Difficulty::Beginner => &self.beginner,
            Difficulty::Intermediate => &self.intermediate,
            Difficulty::Advanced => &self.advanced,
        }
    }
}

impl Default for CommandSets {
    fn default() -> Self {
        Self::standard()
    }
}

/// Two commands drilled back and forth in basic mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrillPair {
    pub first: CommandId,
    pub second: CommandId,
}

/// Named drill pairs and combination patterns
#[derive(Debug, Clone)]
pub struct DrillTables {
    pairs: AHashMap<String, DrillPair>,
    patterns: AHashMap<String, Vec<CommandId>>,
}

impl DrillTables {
    pub fn standard() -> Self {
        let pairs = [
            ("marche_rompe", Marche, Rompe),
            ("en_garde_fendez", EnGarde, Fendez),
            ("bond", BondAvant, BondArriere),
            ("allongez_fendez", Allongez, Fendez),
            ("fendez_remise", Fendez, Remise),
        ]
        .into_iter()
        .map(|(name, first, second)| (name.to_string(), DrillPair { first, second }))
        .collect();

        let patterns = [
            // Advance and attack
            ("A", vec![Marche, Marche, Allongez, Fendez, Remise]),
            // Counter-attack out of a retreat
            ("B", vec![Rompe, Rompe, Marche, Fendez, Remise]),
            // Footwork conditioning
            ("C", vec![Marche, Marche, Rompe, Marche, Rompe, Rompe]),
        ]
        .into_iter()
        .map(|(name, commands)| (name.to_string(), commands))
        .collect();

        Self { pairs, patterns }
    }

    pub fn pair(&self, pair_id: &str) -> Result<DrillPair> {
        self.pairs
            .get(pair_id)
            .copied()
            .ok_or_else(|| DrillError::not_found("drill pair", pair_id))
    }

    pub fn pattern(&self, pattern_id: &str) -> Result<&[CommandId]> {
        self.patterns
            .get(pattern_id)
            .map(Vec::as_slice)
            .ok_or_else(|| DrillError::not_found("pattern", pattern_id))
    }

    pub fn pattern_ids(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }
}

impl Default for DrillTables {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sets_grow_with_difficulty() {
        let sets = CommandSets::standard();
        let beginner = sets.for_difficulty(Difficulty::Beginner);
        let intermediate = sets.for_difficulty(Difficulty::Intermediate);
        let advanced = sets.for_difficulty(Difficulty::Advanced);

        assert_eq!(beginner, &[Marche, Rompe]);
        assert!(beginner.iter().all(|c| intermediate.contains(c)));
        assert!(intermediate.iter().all(|c| advanced.contains(c)));
        assert!(intermediate.contains(&Fendez) && intermediate.contains(&Remise));
        assert!(advanced.contains(&BondAvant) && advanced.contains(&Balancez));
    }

    #[test]
    fn test_patterns() {
        let tables = DrillTables::standard();
        assert_eq!(
            tables.pattern("A").unwrap(),
            &[Marche, Marche, Allongez, Fendez, Remise]
        );
        assert_eq!(tables.pattern("B").unwrap(), &[Rompe, Rompe, Marche, Fendez, Remise]);
        assert_eq!(tables.pattern("C").unwrap().len(), 6);
        assert_eq!(tables.pattern_ids().count(), 3);
    }

    #[test]
    fn test_unknown_pattern_is_not_found() {
        let tables = DrillTables::standard();
        assert!(tables.pattern("Z").unwrap_err().is_not_found());
    }

    #[test]
    fn test_pairs() {
        let tables = DrillTables::standard();
        let pair = tables.pair("bond").unwrap();
        assert_eq!(pair.first, BondAvant);
        assert_eq!(pair.second, BondArriere);
        assert!(tables.pair("nope").unwrap_err().is_not_found());
    }
}
