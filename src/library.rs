//! The immutable bundle of drill data
//!
//! Built once at startup and shared (usually behind an `Arc`) by every
//! running sequence. Nothing in here is mutated after construction.

use crate::commands::{CommandCatalog, CommandSets, DrillTables};
use crate::core::error::Result;
use crate::phrases::PhraseLibrary;
use crate::selection::{SelectionEngine, TransitionTable};
use crate::weapons::WeaponTable;

#[derive(Debug, Clone)]
pub struct DrillLibrary {
    pub catalog: CommandCatalog,
    pub weapons: WeaponTable,
    pub phrases: PhraseLibrary,
    pub transitions: TransitionTable,
    pub command_sets: CommandSets,
    pub tables: DrillTables,
}

impl DrillLibrary {
    /// Standard tables, checked for authoring mistakes
    pub fn standard() -> Result<Self> {
        let library = Self {
            catalog: CommandCatalog::standard(),
            weapons: WeaponTable::standard(),
            phrases: PhraseLibrary::standard(),
            transitions: TransitionTable::standard(),
            command_sets: CommandSets::standard(),
            tables: DrillTables::standard(),
        };
        library.verify()?;
        Ok(library)
    }

    pub fn verify(&self) -> Result<()> {
        self.phrases.verify(&self.catalog)?;
        tracing::debug!(
            "Drill library verified: {} commands, {} phrases",
            self.catalog.len(),
            self.phrases.all().len()
        );
        Ok(())
    }

    pub fn engine(&self) -> SelectionEngine<'_> {
        SelectionEngine::new(&self.catalog, &self.weapons, &self.transitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::CommandId;

    #[test]
    fn test_standard_library_builds() {
        let library = DrillLibrary::standard().unwrap();
        assert!(library.catalog.contains(CommandId::Halte));
        assert!(library.tables.pattern("A").is_ok());
    }

    #[test]
    fn test_every_table_command_is_in_catalog() {
        let library = DrillLibrary::standard().unwrap();
        for id in library.tables.pattern_ids() {
            for cmd in library.tables.pattern(id).unwrap() {
                assert!(library.catalog.contains(*cmd));
            }
        }
        for phrase in library.phrases.all() {
            assert!(phrase.commands.iter().all(|c| library.catalog.contains(*c)));
        }
    }
}
