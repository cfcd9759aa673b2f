use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use item_bank_common::components::PartyLimits;
use item_bank_data::ItemData;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct CommandLabels {
    pub bank: String,
    pub store: String,
    pub remove: String,
    pub cancel: String,
}

impl Default for CommandLabels {
    fn default() -> Self {
        Self {
            bank: String::from("Bank"),
            store: String::from("Store"),
            remove: String::from("Remove"),
            cancel: String::from("Cancel"),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SoundEffect {
    pub name: String,
    pub volume: u32,
    pub pitch: u32,
}

impl SoundEffect {
    pub fn new(name: &str, volume: u32, pitch: u32) -> Self {
        Self {
            name: name.to_string(),
            volume,
            pitch,
        }
    }
}

#[derive(Resource, Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    /// Game variable holding the current box number, 0 for a single box.
    pub box_variable_id: usize,
    pub command_labels: CommandLabels,
    pub allow_priceless_items: bool,
    pub allow_key_items: bool,
    /// 0 keeps the party inventory's own limit.
    pub party_gold_cap_override: i64,
    /// 0 keeps the party inventory's own limit.
    pub party_item_cap_override: u32,
    /// Repeats while gold is moving.
    pub bank_sound: SoundEffect,
    pub item_sound: SoundEffect,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            box_variable_id: 0,
            command_labels: CommandLabels::default(),
            allow_priceless_items: true,
            allow_key_items: true,
            party_gold_cap_override: 0,
            party_item_cap_override: 0,
            bank_sound: SoundEffect::new("Shop", 50, 150),
            item_sound: SoundEffect::new("Equip2", 90, 100),
        }
    }
}

impl StorageConfig {
    pub fn party_limits(&self) -> PartyLimits {
        PartyLimits::from_overrides(self.party_gold_cap_override, self.party_item_cap_override)
    }

    pub fn can_store(&self, item_data: &ItemData) -> bool {
        if item_data.key_item && !self.allow_key_items {
            return false;
        }

        self.allow_priceless_items || !item_data.is_priceless()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use item_bank_common::components::Money;

    #[test]
    fn missing_fields_use_defaults() {
        let config: StorageConfig = serde_json::from_str(
            r#"{ "box_variable_id": 14, "allow_key_items": false, "command_labels": { "bank": "Banque", "store": "Stocker", "remove": "Retirer", "cancel": "Retour" } }"#,
        )
        .unwrap();

        assert_eq!(config.box_variable_id, 14);
        assert!(!config.allow_key_items);
        assert!(config.allow_priceless_items);
        assert_eq!(config.command_labels.bank, "Banque");
        assert_eq!(config.item_sound, SoundEffect::new("Equip2", 90, 100));
    }

    #[test]
    fn storable_items() {
        let mut config = StorageConfig::default();
        let potion = ItemData::new("Potion", 50);
        let gift = ItemData::new("Letter", 0);
        let key = ItemData::key_item("Old Key");

        assert!(config.can_store(&potion));
        assert!(config.can_store(&gift));
        assert!(config.can_store(&key));

        config.allow_priceless_items = false;
        assert!(config.can_store(&potion));
        assert!(!config.can_store(&gift));
        assert!(!config.can_store(&key));

        config.allow_priceless_items = true;
        config.allow_key_items = false;
        assert!(config.can_store(&gift));
        assert!(!config.can_store(&key));
    }

    #[test]
    fn party_limit_overrides() {
        let mut config = StorageConfig::default();
        assert_eq!(config.party_limits(), PartyLimits::default());

        config.party_gold_cap_override = 5000;
        config.party_item_cap_override = 20;
        assert_eq!(config.party_limits().gold_cap, Some(Money(5000)));
        assert_eq!(config.party_limits().item_cap, Some(20));
    }
}
