pub mod profile;

pub use profile::{WeaponProfile, WeaponTable, DEFAULT_COMMAND_WEIGHT};
