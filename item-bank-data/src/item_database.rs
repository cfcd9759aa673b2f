use enum_map::{Enum, EnumMap};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Copy, Clone, Debug, Enum, Deserialize, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemKind {
    Consumable,
    Weapon,
    Armor,
}

impl ItemKind {
    pub fn as_script_name(self) -> &'static str {
        match self {
            ItemKind::Consumable => "item",
            ItemKind::Weapon => "weapon",
            ItemKind::Armor => "armor",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown item kind \"{0}\", expected item, weapon or armor")]
pub struct ParseItemKindError(pub String);

impl FromStr for ItemKind {
    type Err = ParseItemKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "item" => Ok(ItemKind::Consumable),
            "weapon" => Ok(ItemKind::Weapon),
            "armor" => Ok(ItemKind::Armor),
            _ => Err(ParseItemKindError(s.to_string())),
        }
    }
}

#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemReference {
    pub item_kind: ItemKind,
    pub item_number: usize,
}

impl ItemReference {
    pub fn new(item_kind: ItemKind, item_number: usize) -> Self {
        Self {
            item_kind,
            item_number,
        }
    }

    pub fn consumable(item_number: usize) -> Self {
        Self::new(ItemKind::Consumable, item_number)
    }

    pub fn weapon(item_number: usize) -> Self {
        Self::new(ItemKind::Weapon, item_number)
    }

    pub fn armor(item_number: usize) -> Self {
        Self::new(ItemKind::Armor, item_number)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ItemData {
    pub name: String,
    pub price: u32,

    /// Only meaningful for consumables, weapons and armor are never key items.
    #[serde(default)]
    pub key_item: bool,
}

impl ItemData {
    pub fn new(name: &str, price: u32) -> Self {
        Self {
            name: name.to_string(),
            price,
            key_item: false,
        }
    }

    pub fn key_item(name: &str) -> Self {
        Self {
            name: name.to_string(),
            price: 0,
            key_item: true,
        }
    }

    pub fn is_priceless(&self) -> bool {
        self.price == 0
    }
}

#[derive(Default)]
pub struct ItemDatabase {
    items: EnumMap<ItemKind, Vec<Option<ItemData>>>,
}

impl ItemDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: ItemReference, mut data: ItemData) {
        if item.item_kind != ItemKind::Consumable {
            data.key_item = false;
        }

        let items = &mut self.items[item.item_kind];
        if items.len() <= item.item_number {
            items.resize(item.item_number + 1, None);
        }
        items[item.item_number] = Some(data);
    }

    pub fn get_item(&self, item: ItemReference) -> Option<&ItemData> {
        self.items[item.item_kind]
            .get(item.item_number)
            .and_then(|x| x.as_ref())
    }

    /// Catalog ids start at 1, so 0 never resolves.
    pub fn resolve(&self, item_kind: ItemKind, item_number: usize) -> Option<ItemReference> {
        if item_number == 0 {
            return None;
        }

        let item = ItemReference::new(item_kind, item_number);
        self.get_item(item).map(|_| item)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemReference, &ItemData)> + '_ {
        self.items.iter().flat_map(|(item_kind, items)| {
            items.iter().enumerate().filter_map(move |(item_number, data)| {
                data.as_ref()
                    .map(|data| (ItemReference::new(item_kind, item_number), data))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_script_kind_names() {
        assert_eq!("item".parse::<ItemKind>(), Ok(ItemKind::Consumable));
        assert_eq!("weapon".parse::<ItemKind>(), Ok(ItemKind::Weapon));
        assert_eq!("armor".parse::<ItemKind>(), Ok(ItemKind::Armor));
        assert_eq!(
            "Armor".parse::<ItemKind>(),
            Err(ParseItemKindError(String::from("Armor")))
        );
    }

    #[test]
    fn resolve_only_known_items() {
        let mut database = ItemDatabase::new();
        database.insert(ItemReference::weapon(5), ItemData::new("Club", 50));

        assert_eq!(
            database.resolve(ItemKind::Weapon, 5),
            Some(ItemReference::weapon(5))
        );
        assert_eq!(database.resolve(ItemKind::Weapon, 4), None);
        assert_eq!(database.resolve(ItemKind::Armor, 5), None);
        assert_eq!(database.resolve(ItemKind::Weapon, 0), None);
    }

    #[test]
    fn key_item_flag_only_applies_to_consumables() {
        let mut database = ItemDatabase::new();
        database.insert(ItemReference::consumable(1), ItemData::key_item("Old Key"));
        database.insert(ItemReference::armor(1), ItemData::key_item("Cursed Ring"));

        assert!(database.get_item(ItemReference::consumable(1)).unwrap().key_item);
        assert!(!database.get_item(ItemReference::armor(1)).unwrap().key_item);
        assert_eq!(database.iter().count(), 2);
    }
}
