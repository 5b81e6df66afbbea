//! Mode sequencers
//!
//! Turns a mode configuration into a timed stream of drill events, or into
//! a plain command list for consumers that do their own timing.

pub mod config;
pub mod events;
pub mod generate;
pub mod runner;
pub mod stream;
pub mod timeline;

pub use config::{
    tempo_interval, DurationConfig, FixedPairConfig, IntervalConfig, ModeConfig, PatternConfig,
};
pub use events::{format_remaining, DrillEvent, Phase, Progress};
pub use generate::{
    generate_combination, generate_fixed_pair, generate_for_mode, generate_interval_work_commands,
    generate_random_commands,
};
pub use runner::{SequenceSummary, Sequencer};
pub use stream::PhraseStream;
pub use timeline::{SequencePhase, Timeline, TimelineTrigger};
