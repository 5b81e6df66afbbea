//! Fencing Drill - footwork command sequencing
//!
//! Streams timed footwork commands for a single trainee, following a
//! training mode, the weapon's rules, and a simulated position on the piste.

pub mod commands;
pub mod core;
pub mod library;
pub mod phrases;
pub mod position;
pub mod selection;
pub mod sequencer;
pub mod weapons;

pub use library::DrillLibrary;
