//! Command definitions and catalog

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{DrillError, Result};
use crate::core::types::{CommandId, Weapon};

/// Prefix under which audio cues are served
pub const AUDIO_PATH_PREFIX: &str = "/static/audio/";

/// A spoken command with French and Japanese display text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub id: CommandId,
    pub french: String,
    pub japanese: String,
    pub audio_file: String,
    /// Allowed weapons. `None` means every weapon may use it.
    pub weapons: Option<Vec<Weapon>>,
}

impl Command {
    fn new(id: CommandId, french: &str, japanese: &str) -> Self {
        Self {
            id,
            french: french.to_string(),
            japanese: japanese.to_string(),
            audio_file: format!("{}.mp3", id.as_str()),
            weapons: None,
        }
    }

    fn only_for(mut self, weapons: &[Weapon]) -> Self {
        self.weapons = Some(weapons.to_vec());
        self
    }

    pub fn is_weapon_specific(&self) -> bool {
        self.weapons.is_some()
    }

    pub fn allows(&self, weapon: Weapon) -> bool {
        match &self.weapons {
            None => true,
            Some(allowed) => allowed.contains(&weapon),
        }
    }

    /// Payload sent to the client for this command
    pub fn to_payload(&self) -> CommandPayload {
        CommandPayload {
            id: self.id,
            fr: self.french.clone(),
            jp: self.japanese.clone(),
            audio: format!("{}{}", AUDIO_PATH_PREFIX, self.audio_file),
        }
    }
}

/// Wire form of a command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandPayload {
    pub id: CommandId,
    pub fr: String,
    pub jp: String,
    pub audio: String,
}

/// Read-only registry of commands and their position effects
#[derive(Debug, Clone)]
pub struct CommandCatalog {
    commands: AHashMap<CommandId, Command>,
    position_effects: AHashMap<CommandId, f32>,
}

impl CommandCatalog {
    /// The standard fencing catalog
    pub fn standard() -> Self {
        let commands = [
            Command::new(CommandId::EnGarde, "En garde", "アンギャルド"),
            Command::new(CommandId::Marche, "Marchez", "マルシェ"),
            Command::new(CommandId::Rompe, "Rompez", "ロンペ"),
            Command::new(CommandId::Allongez, "Allongez le bras", "アロンジェ・ル・ブラ"),
            Command::new(CommandId::Fendez, "Fendez", "ファンドゥ"),
            Command::new(CommandId::Remise, "Remise en garde", "ルミーズ・アンギャルド"),
            Command::new(CommandId::Balancez, "Balancez", "バランセ"),
            Command::new(CommandId::DoubleMarche, "Double marchez", "ドゥブル・マルシェ"),
            Command::new(CommandId::BondAvant, "Bond en avant", "ボンナバン"),
            Command::new(CommandId::BondArriere, "Bond en arrière", "ボンナリエール"),
            Command::new(CommandId::Fleche, "Flèche", "フレッシュ").only_for(&[Weapon::Sabre]),
            Command::new(CommandId::Halte, "Halte", "止め"),
        ];

        // Positive = toward the opponent. Unlisted commands do not move.
        let position_effects = [
            (CommandId::Marche, 1.0),
            (CommandId::Rompe, -1.0),
            (CommandId::Fendez, 2.0),
            (CommandId::Remise, -2.0),
            (CommandId::DoubleMarche, 2.0),
            (CommandId::BondAvant, 1.5),
            (CommandId::BondArriere, -1.5),
            (CommandId::Fleche, 3.0),
        ];

        Self::new(commands, position_effects)
    }

    pub fn new(
        commands: impl IntoIterator<Item = Command>,
        position_effects: impl IntoIterator<Item = (CommandId, f32)>,
    ) -> Self {
        Self {
            commands: commands.into_iter().map(|c| (c.id, c)).collect(),
            position_effects: position_effects.into_iter().collect(),
        }
    }

    /// Look up a command by its string id
    pub fn lookup(&self, id: &str) -> Result<&Command> {
        let id: CommandId = id.parse()?;
        self.get(id)
    }

    /// Look up a command by typed id
    pub fn get(&self, id: CommandId) -> Result<&Command> {
        self.commands
            .get(&id)
            .ok_or_else(|| DrillError::not_found("command", id.as_str()))
    }

    pub fn contains(&self, id: CommandId) -> bool {
        self.commands.contains_key(&id)
    }

    /// Commands absent from the catalog are valid for no weapon.
    pub fn is_valid_for_weapon(&self, id: CommandId, weapon: Weapon) -> bool {
        self.commands
            .get(&id)
            .map(|cmd| cmd.allows(weapon))
            .unwrap_or(false)
    }

    pub fn position_effect(&self, id: CommandId) -> f32 {
        self.position_effects.get(&id).copied().unwrap_or(0.0)
    }

    pub fn payload(&self, id: CommandId) -> Result<CommandPayload> {
        Ok(self.get(id)?.to_payload())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }
}

impl Default for CommandCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_has_every_command() {
        let catalog = CommandCatalog::standard();
        assert_eq!(catalog.len(), CommandId::ALL.len());
        for id in CommandId::ALL {
            assert!(catalog.contains(id), "{} missing", id);
        }
    }

    #[test]
    fn test_lookup_by_string() {
        let catalog = CommandCatalog::standard();
        let halte = catalog.lookup("halte").unwrap();
        assert_eq!(halte.french, "Halte");
        assert_eq!(halte.audio_file, "halte.mp3");
    }

    #[test]
    fn test_lookup_unknown_is_not_found() {
        let catalog = CommandCatalog::standard();
        assert!(catalog.lookup("coupe").unwrap_err().is_not_found());
    }

    #[test]
    fn test_lookup_missing_from_custom_catalog() {
        let catalog = CommandCatalog::new(
            [Command::new(CommandId::Marche, "Marchez", "マルシェ")],
            Vec::<(CommandId, f32)>::new(),
        );
        assert!(catalog.get(CommandId::Rompe).unwrap_err().is_not_found());
        assert!(!catalog.is_valid_for_weapon(CommandId::Rompe, Weapon::Foil));
    }

    #[test]
    fn test_fleche_is_sabre_only() {
        let catalog = CommandCatalog::standard();
        assert!(catalog.is_valid_for_weapon(CommandId::Fleche, Weapon::Sabre));
        assert!(!catalog.is_valid_for_weapon(CommandId::Fleche, Weapon::Foil));
        assert!(!catalog.is_valid_for_weapon(CommandId::Fleche, Weapon::Epee));
    }

    #[test]
    fn test_validity_is_total() {
        let catalog = CommandCatalog::standard();
        for id in CommandId::ALL {
            for weapon in Weapon::ALL {
                let cmd = catalog.get(id).unwrap();
                let valid = catalog.is_valid_for_weapon(id, weapon);
                if !cmd.is_weapon_specific() {
                    assert!(valid);
                }
            }
        }
    }

    #[test]
    fn test_position_effects() {
        let catalog = CommandCatalog::standard();
        assert_eq!(catalog.position_effect(CommandId::Marche), 1.0);
        assert_eq!(catalog.position_effect(CommandId::Rompe), -1.0);
        assert_eq!(catalog.position_effect(CommandId::BondArriere), -1.5);
        assert_eq!(catalog.position_effect(CommandId::Halte), 0.0);
        assert_eq!(catalog.position_effect(CommandId::Balancez), 0.0);
    }

    #[test]
    fn test_unmapped_effect_defaults_to_zero() {
        let catalog = CommandCatalog::new(Vec::<Command>::new(), Vec::<(CommandId, f32)>::new());
        assert_eq!(catalog.position_effect(CommandId::Fleche), 0.0);
    }

    #[test]
    fn test_payload_shape() {
        let catalog = CommandCatalog::standard();
        let payload = catalog.payload(CommandId::EnGarde).unwrap();
        assert_eq!(payload.fr, "En garde");
        assert_eq!(payload.audio, "/static/audio/en_garde.mp3");

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["id"], "en_garde");
        assert_eq!(json["jp"], "アンギャルド");
    }
}
