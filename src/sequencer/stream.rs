//! Phrase-driven command stream
//!
//! Random drills chain whole phrases picked for the current position, then
//! filter each command through the per-command rules:
//! - after fendez the next command is always remise
//! - remise never follows remise (the command is dropped)
//! - a transition bias may replace the command (not right after fendez)
//! - commands outside the difficulty's command set are dropped
//! - commands the weapon cannot use, or weighs at zero, are dropped
//!
//! If phrase after phrase yields nothing, the stream falls back to
//! [`SelectionEngine::select_next`] for one command.

use rand::Rng;
use std::collections::VecDeque;

use crate::core::config::DrillSettings;
use crate::core::error::Result;
use crate::core::types::{CommandId, Difficulty, Weapon};
use crate::library::DrillLibrary;
use crate::phrases::Phrase;
use crate::position::PositionTracker;
use crate::selection::{forced_successor, CommandHistory, SelectionEngine};

pub struct PhraseStream<'a> {
    library: &'a DrillLibrary,
    engine: SelectionEngine<'a>,
    phrases: Vec<&'a Phrase>,
    command_set: &'a [CommandId],
    weapon: Weapon,
    tracker: PositionTracker,
    history: CommandHistory,
    last: Option<CommandId>,
    pending: VecDeque<CommandId>,
    /// `None` before the first phrase, otherwise whether the current phrase emitted anything
    phrase_yielded: Option<bool>,
    empty_phrases: usize,
    max_empty_phrases: usize,
}

impl<'a> PhraseStream<'a> {
    pub fn new(library: &'a DrillLibrary, difficulty: Difficulty, weapon: Weapon) -> Self {
        let settings = DrillSettings::default();
        Self {
            library,
            engine: library.engine(),
            phrases: library.phrases.phrases_for(difficulty),
            command_set: library.command_sets.for_difficulty(difficulty),
            weapon,
            tracker: PositionTracker::new(),
            history: CommandHistory::with_capacity(settings.history_window),
            last: None,
            pending: VecDeque::new(),
            phrase_yielded: None,
            empty_phrases: 0,
            max_empty_phrases: settings.max_empty_phrases,
        }
    }

    pub fn with_settings(mut self, settings: &DrillSettings) -> Self {
        self.history = CommandHistory::with_capacity(settings.history_window);
        self.max_empty_phrases = settings.max_empty_phrases.max(1);
        self
    }

    pub fn position(&self) -> f32 {
        self.tracker.position()
    }

    pub fn last(&self) -> Option<CommandId> {
        self.last
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Forget position, history and any half-played phrase
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.history.clear();
        self.last = None;
        self.pending.clear();
        self.phrase_yielded = None;
        self.empty_phrases = 0;
    }

    /// Produce the next command, updating position and history
    pub fn next_command(&mut self, rng: &mut impl Rng) -> Result<CommandId> {
        loop {
            while let Some(candidate) = self.pending.pop_front() {
                if let Some(cmd) = self.admit(candidate, rng) {
                    self.accept(cmd);
                    return Ok(cmd);
                }
            }

            if self.phrase_yielded == Some(false) {
                self.empty_phrases += 1;
            }

            if self.empty_phrases >= self.max_empty_phrases {
                let cmd = self.engine.select_next(
                    self.command_set,
                    &self.history,
                    self.last,
                    self.weapon,
                    rng,
                )?;
                tracing::warn!(
                    weapon = %self.weapon,
                    "Degraded selection: {} phrases in a row yielded nothing, picked {}",
                    self.empty_phrases,
                    cmd
                );
                self.phrase_yielded = None;
                self.accept(cmd);
                return Ok(cmd);
            }

            let phrase = self
                .engine
                .select_phrase(self.tracker.position(), &self.phrases, rng)?;
            tracing::debug!(
                position = self.tracker.position(),
                "Phrase {} ({} commands)",
                phrase.id,
                phrase.commands.len()
            );
            self.pending.extend(phrase.commands.iter().copied());
            self.phrase_yielded = Some(false);
        }
    }

    /// Draw `count` commands
    pub fn take(&mut self, count: usize, rng: &mut impl Rng) -> Result<Vec<CommandId>> {
        let mut commands = Vec::with_capacity(count);
        for _ in 0..count {
            commands.push(self.next_command(rng)?);
        }
        Ok(commands)
    }

    /// Run a phrase command through the per-command rules
    fn admit(&self, candidate: CommandId, rng: &mut impl Rng) -> Option<CommandId> {
        let mut cmd = forced_successor(self.last).unwrap_or(candidate);

        if cmd == CommandId::Remise && self.last == Some(CommandId::Remise) {
            return None;
        }

        if let Some(last) = self.last.filter(|l| !l.is_lunge()) {
            if let Some(preferred) =
                self.library.transitions.preferred_next(last, self.command_set, rng)
            {
                cmd = preferred;
            }
        }

        if !self.command_set.contains(&cmd) {
            return None;
        }
        if !self.engine.allowed_for_weapon(cmd, self.weapon) {
            return None;
        }
        Some(cmd)
    }

    fn accept(&mut self, cmd: CommandId) {
        self.tracker.apply_command(&self.library.catalog, cmd);
        self.history.push(cmd);
        self.last = Some(cmd);
        self.empty_phrases = 0;
        if self.phrase_yielded.is_some() {
            self.phrase_yielded = Some(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phrases::PhraseLibrary;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use CommandId::*;

    fn library() -> DrillLibrary {
        DrillLibrary::standard().unwrap()
    }

    #[test]
    fn test_beginner_stays_in_beginner_set() {
        let library = library();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut stream = PhraseStream::new(&library, Difficulty::Beginner, Weapon::Foil);
        let commands = stream.take(200, &mut rng).unwrap();
        assert_eq!(commands.len(), 200);
        assert!(commands.iter().all(|c| matches!(c, Marche | Rompe)));
    }

    #[test]
    fn test_fendez_always_followed_by_remise() {
        let library = library();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut stream = PhraseStream::new(&library, Difficulty::Advanced, Weapon::Epee);
        let commands = stream.take(500, &mut rng).unwrap();
        for pair in commands.windows(2) {
            if pair[0] == Fendez {
                assert_eq!(pair[1], Remise);
            }
            assert!(!(pair[0] == Remise && pair[1] == Remise));
        }
    }

    #[test]
    fn test_position_stays_bounded() {
        let library = library();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut stream = PhraseStream::new(&library, Difficulty::Intermediate, Weapon::Foil);
        for _ in 0..1000 {
            stream.next_command(&mut rng).unwrap();
            assert!(stream.position().abs() < 12.0, "position {}", stream.position());
        }
    }

    #[test]
    fn test_sabre_never_balancez() {
        let library = library();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut stream = PhraseStream::new(&library, Difficulty::Advanced, Weapon::Sabre);
        let commands = stream.take(1000, &mut rng).unwrap();
        assert!(!commands.contains(&Balancez));
    }

    #[test]
    fn test_reset_clears_state() {
        let library = library();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut stream = PhraseStream::new(&library, Difficulty::Beginner, Weapon::Foil);
        stream.take(7, &mut rng).unwrap();
        assert!(stream.last().is_some());

        stream.reset();
        assert_eq!(stream.position(), 0.0);
        assert!(stream.history().is_empty());
        assert_eq!(stream.last(), None);
    }

    #[test]
    fn test_degrades_when_phrases_yield_nothing() {
        let mut library = library();
        library.phrases = PhraseLibrary::new(vec![Phrase::new(
            "sway",
            "Sway",
            vec![Balancez],
            0.0,
            Difficulty::Beginner,
        )]);
        let settings = DrillSettings {
            max_empty_phrases: 4,
            ..DrillSettings::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut stream =
            PhraseStream::new(&library, Difficulty::Beginner, Weapon::Foil).with_settings(&settings);
        let commands = stream.take(10, &mut rng).unwrap();
        assert_eq!(commands.len(), 10);
        assert!(commands.iter().all(|c| matches!(c, Marche | Rompe)));
    }
}
