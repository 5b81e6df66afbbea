//! Phrase catalog for natural movement sequences

pub mod library;

pub use library::{Phrase, PhraseLibrary, ATTACK_PHRASE_WEIGHT};
