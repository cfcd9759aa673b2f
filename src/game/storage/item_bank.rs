use anyhow::Context;
use log::warn;
use serde::{Deserialize, Serialize};

use item_bank_common::components::{BoxId, Money, StorageLedger};
use item_bank_data::ItemReference;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct StoredItem {
    pub item: ItemReference,
    pub quantity: u32,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct StoredBox {
    pub box_id: BoxId,
    pub items: Vec<StoredItem>,
}

/// The ledger as written into the host's save data.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ItemBankStorage {
    pub boxes: Vec<StoredBox>,
    pub gold: Money,
}

impl From<&StorageLedger> for ItemBankStorage {
    fn from(ledger: &StorageLedger) -> Self {
        let mut box_ids: Vec<BoxId> = ledger.boxes().collect();
        box_ids.sort_unstable();

        Self {
            boxes: box_ids
                .into_iter()
                .map(|box_id| StoredBox {
                    box_id,
                    items: ledger
                        .box_items(box_id)
                        .into_iter()
                        .map(|(item, quantity)| StoredItem { item, quantity })
                        .collect(),
                })
                .collect(),
            gold: ledger.gold_balance(),
        }
    }
}

impl From<ItemBankStorage> for StorageLedger {
    fn from(storage: ItemBankStorage) -> Self {
        let mut ledger = StorageLedger::new();

        for stored_box in storage.boxes {
            ledger.ensure_box(stored_box.box_id);

            for stored_item in stored_box.items {
                if let Err(error) =
                    ledger.add_item(stored_box.box_id, stored_item.item, stored_item.quantity)
                {
                    warn!(
                        target: "storage",
                        "Ignoring stored item {:?} in {:?}: {}",
                        stored_item.item,
                        stored_box.box_id,
                        error
                    );
                }
            }
        }

        if let Err(error) = ledger.deposit_gold(storage.gold) {
            warn!(target: "storage", "Ignoring banked gold {}: {}", storage.gold, error);
        }

        ledger
    }
}

impl ItemBankStorage {
    pub fn to_json(&self) -> Result<String, anyhow::Error> {
        serde_json::to_string_pretty(self).context("Failed to serialise ItemBankStorage")
    }

    pub fn from_json(json: &str) -> Result<Self, anyhow::Error> {
        serde_json::from_str(json).context("Failed to deserialise ItemBankStorage")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_keeps_boxes_and_gold() {
        let mut ledger = StorageLedger::new();
        ledger
            .add_item(BoxId(1), ItemReference::weapon(5), 20)
            .unwrap();
        ledger
            .add_item(BoxId(1), ItemReference::consumable(2), 3)
            .unwrap();
        ledger.ensure_box(BoxId(0));
        ledger.deposit_gold(Money(250)).unwrap();

        let json = ItemBankStorage::from(&ledger).to_json().unwrap();
        let restored = StorageLedger::from(ItemBankStorage::from_json(&json).unwrap());

        assert_eq!(restored.count_item(BoxId(1), ItemReference::weapon(5)), 20);
        assert_eq!(restored.count_item(BoxId(1), ItemReference::consumable(2)), 3);
        assert!(restored.is_box_empty(BoxId(0)));
        assert_eq!(restored.boxes().count(), 2);
        assert_eq!(restored.gold_balance(), Money(250));
    }

    #[test]
    fn load_drops_invalid_entries() {
        let json = r#"{
            "boxes": [
                {
                    "box_id": 0,
                    "items": [
                        { "item": { "item_kind": "Armor", "item_number": 3 }, "quantity": 0 },
                        { "item": { "item_kind": "Weapon", "item_number": 1 }, "quantity": 2 }
                    ]
                }
            ],
            "gold": -40
        }"#;

        let ledger = StorageLedger::from(ItemBankStorage::from_json(json).unwrap());
        assert_eq!(ledger.count_item(BoxId(0), ItemReference::armor(3)), 0);
        assert_eq!(ledger.box_items(BoxId(0)), vec![(ItemReference::weapon(1), 2)]);
        assert_eq!(ledger.gold_balance(), Money::ZERO);
    }
}
