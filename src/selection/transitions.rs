//! Preferred successors for natural movement flow

use ahash::AHashMap;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::types::CommandId;

/// "After this command, usually do one of these"
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionRule {
    pub preferred: Vec<CommandId>,
    /// Chance that the rule fires when at least one preferred command is available
    pub probability: f64,
}

#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    rules: AHashMap<CommandId, TransitionRule>,
}

impl TransitionTable {
    pub fn standard() -> Self {
        use CommandId::*;

        let mut rules = AHashMap::new();
        // Extending the arm sets up the lunge
        rules.insert(
            Allongez,
            TransitionRule { preferred: vec![Fendez], probability: 0.8 },
        );
        rules.insert(
            Balancez,
            TransitionRule { preferred: vec![Marche, Fendez, BondAvant], probability: 0.6 },
        );
        Self { rules }
    }

    pub fn rule_for(&self, last: CommandId) -> Option<&TransitionRule> {
        self.rules.get(&last)
    }

    /// Roll the transition rule for `last`.
    ///
    /// Returns a preferred successor drawn uniformly from those in `available`,
    /// or `None` when there is no rule, nothing preferred is available, or the
    /// roll misses.
    pub fn preferred_next(
        &self,
        last: CommandId,
        available: &[CommandId],
        rng: &mut impl Rng,
    ) -> Option<CommandId> {
        let rule = self.rules.get(&last)?;
        let candidates: Vec<CommandId> = rule
            .preferred
            .iter()
            .copied()
            .filter(|c| available.contains(c))
            .collect();
        if candidates.is_empty() {
            return None;
        }

        if rng.gen::<f64>() < rule.probability {
            candidates.choose(rng).copied()
        } else {
            None
        }
    }
}
