//! Command catalog and fixed command groupings

pub mod catalog;
pub mod sets;

pub use catalog::{Command, CommandCatalog, CommandPayload};
pub use sets::{CommandSets, DrillPair, DrillTables};
