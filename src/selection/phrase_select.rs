//! Position-aware phrase selection

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::error::{DrillError, Result};
use crate::core::types::Direction;
use crate::phrases::Phrase;
use crate::position::{bias_for, POSITION_HARD_LIMIT};

/// Multiplier for phrases that move back toward the origin
const RETURN_BOOST: f32 = 2.0;
/// Multiplier for phrases that move further out
const DRIFT_PENALTY: f32 = 0.5;

/// Pick a phrase that keeps the trainee near the starting line.
///
/// Past the hard limit only phrases that do not move further out are
/// eligible (all phrases if none qualify). Otherwise phrases are weighted by
/// their base weight, adjusted when the position is past the soft limit.
pub fn select_balanced_phrase<'p>(
    position: f32,
    phrases: &[&'p Phrase],
    rng: &mut impl Rng,
) -> Result<&'p Phrase> {
    if phrases.is_empty() {
        return Err(DrillError::InvalidArgument(
            "no phrases available for selection".into(),
        ));
    }

    if position > POSITION_HARD_LIMIT {
        return Ok(restricted_choice(phrases, |p| p.net_movement <= 0.0, rng));
    }
    if position < -POSITION_HARD_LIMIT {
        return Ok(restricted_choice(phrases, |p| p.net_movement >= 0.0, rng));
    }

    let bias = bias_for(position);
    let picked = phrases
        .choose_weighted(rng, |p| balanced_weight(p, bias))
        .map(|p| *p);

    match picked {
        Ok(phrase) => Ok(phrase),
        // All weights zero: treat every phrase equally
        Err(_) => phrases
            .choose(rng)
            .copied()
            .ok_or_else(|| DrillError::InvalidArgument("no phrases available for selection".into())),
    }
}

/// Base weight, boosted or damped by the soft-limit bias
pub fn balanced_weight(phrase: &Phrase, bias: Direction) -> f32 {
    let movement = phrase.net_movement;
    let factor = match bias {
        Direction::Backward if movement < 0.0 => RETURN_BOOST,
        Direction::Backward if movement > 0.0 => DRIFT_PENALTY,
        Direction::Forward if movement > 0.0 => RETURN_BOOST,
        Direction::Forward if movement < 0.0 => DRIFT_PENALTY,
        _ => 1.0,
    };
    phrase.weight * factor
}

fn restricted_choice<'p>(
    phrases: &[&'p Phrase],
    keep: impl Fn(&Phrase) -> bool,
    rng: &mut impl Rng,
) -> &'p Phrase {
    let valid: Vec<&'p Phrase> = phrases.iter().copied().filter(|&p| keep(p)).collect();
    let pool: &[&'p Phrase] = if valid.is_empty() {
        tracing::debug!("No phrase moves back from the hard limit, using all phrases");
        phrases
    } else {
        &valid
    };
    // pool is never empty here
    pool.choose(rng).copied().unwrap_or(phrases[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{CommandId, Difficulty};
    use crate::phrases::PhraseLibrary;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn count_by_sign(position: f32, difficulty: Difficulty, draws: usize) -> (usize, usize, usize) {
        let library = PhraseLibrary::standard();
        let phrases = library.phrases_for(difficulty);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let (mut fwd, mut back, mut still) = (0, 0, 0);
        for _ in 0..draws {
            let phrase = select_balanced_phrase(position, &phrases, &mut rng).unwrap();
            match phrase.net_movement {
                m if m > 0.0 => fwd += 1,
                m if m < 0.0 => back += 1,
                _ => still += 1,
            }
        }
        (fwd, back, still)
    }

    #[test]
    fn test_empty_is_invalid_argument() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = select_balanced_phrase(0.0, &[], &mut rng).unwrap_err();
        assert!(matches!(err, DrillError::InvalidArgument(_)));
    }

    #[test]
    fn test_hard_forward_limit_forces_non_positive() {
        let (fwd, _, _) = count_by_sign(6.0, Difficulty::Advanced, 500);
        assert_eq!(fwd, 0);
    }

    #[test]
    fn test_hard_backward_limit_forces_non_negative() {
        let (_, back, _) = count_by_sign(-6.0, Difficulty::Advanced, 500);
        assert_eq!(back, 0);
    }

    #[test]
    fn test_soft_forward_prefers_retreat() {
        let (fwd, back, _) = count_by_sign(4.0, Difficulty::Beginner, 1000);
        assert!(back > fwd * 2, "back {} fwd {}", back, fwd);
    }

    #[test]
    fn test_soft_backward_prefers_advance() {
        let (fwd, back, _) = count_by_sign(-4.0, Difficulty::Beginner, 1000);
        assert!(fwd > back * 2, "fwd {} back {}", fwd, back);
    }

    #[test]
    fn test_hard_limit_falls_back_when_nothing_qualifies() {
        let only_forward = Phrase::new(
            "advance",
            "Advance",
            vec![CommandId::Marche],
            1.0,
            Difficulty::Beginner,
        );
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let picked = select_balanced_phrase(9.0, &[&only_forward], &mut rng).unwrap();
        assert_eq!(picked.id, "advance");
    }

    #[test]
    fn test_balanced_weight() {
        let library = PhraseLibrary::standard();
        let advance = library.get("simple_advance").unwrap();
        let retreat = library.get("simple_retreat").unwrap();
        let attack = library.get("advance_attack").unwrap();

        assert_eq!(balanced_weight(advance, Direction::Neutral), 1.0);
        assert_eq!(balanced_weight(advance, Direction::Backward), 0.5);
        assert_eq!(balanced_weight(retreat, Direction::Backward), 2.0);
        assert_eq!(balanced_weight(attack, Direction::Forward), 1.0);
    }
}
