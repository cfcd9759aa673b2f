use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use item_bank_data::ItemReference;

use crate::components::{Money, PartyInventory};

#[derive(
    Copy, Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
pub struct BoxId(pub i32);

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    #[error("Invalid amount")]
    InvalidAmount,
    #[error("Item not found")]
    UnknownItem,
    #[error("Capacity exceeded")]
    CapacityExceeded,
}

/// Items stored per box and the gold bank.
///
/// Gold is not partitioned by box, every box shares the same bank.
#[derive(Component, Clone, Debug, Default)]
pub struct StorageLedger {
    boxes: HashMap<BoxId, HashMap<ItemReference, u32>>,
    gold: Money,
}

impl StorageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ensure_box(&mut self, box_id: BoxId) {
        self.boxes.entry(box_id).or_default();
    }

    pub fn add_item(
        &mut self,
        box_id: BoxId,
        item: ItemReference,
        amount: u32,
    ) -> Result<u32, StorageError> {
        if amount == 0 {
            return Err(StorageError::InvalidAmount);
        }

        let quantity = self
            .boxes
            .entry(box_id)
            .or_default()
            .entry(item)
            .or_insert(0);
        *quantity = quantity.saturating_add(amount);
        Ok(*quantity)
    }

    /// Returns the quantity actually removed.
    pub fn remove_item(
        &mut self,
        box_id: BoxId,
        item: ItemReference,
        amount: u32,
    ) -> Result<u32, StorageError> {
        if amount == 0 {
            return Err(StorageError::InvalidAmount);
        }

        let items = self
            .boxes
            .get_mut(&box_id)
            .ok_or(StorageError::UnknownItem)?;
        let quantity = items.get_mut(&item).ok_or(StorageError::UnknownItem)?;

        if *quantity <= amount {
            let removed = *quantity;
            items.remove(&item);
            Ok(removed)
        } else {
            *quantity -= amount;
            Ok(amount)
        }
    }

    pub fn count_item(&self, box_id: BoxId, item: ItemReference) -> u32 {
        self.boxes
            .get(&box_id)
            .and_then(|items| items.get(&item))
            .copied()
            .unwrap_or(0)
    }

    pub fn is_box_empty(&self, box_id: BoxId) -> bool {
        self.boxes
            .get(&box_id)
            .map_or(true, |items| items.is_empty())
    }

    /// Stored items of a box, sorted by item.
    pub fn box_items(&self, box_id: BoxId) -> Vec<(ItemReference, u32)> {
        let mut items: Vec<(ItemReference, u32)> = self
            .boxes
            .get(&box_id)
            .map(|items| items.iter().map(|(item, quantity)| (*item, *quantity)).collect())
            .unwrap_or_default();
        items.sort_unstable_by_key(|(item, _)| *item);
        items
    }

    pub fn boxes(&self) -> impl Iterator<Item = BoxId> + '_ {
        self.boxes.keys().copied()
    }

    pub fn deposit_gold(&mut self, amount: Money) -> Result<Money, StorageError> {
        if amount < Money::ZERO {
            return Err(StorageError::InvalidAmount);
        }

        self.gold += amount;
        Ok(self.gold)
    }

    /// Returns the amount actually withdrawn, which is truncated to the
    /// current balance.
    pub fn withdraw_gold(&mut self, amount: Money) -> Result<Money, StorageError> {
        if amount < Money::ZERO {
            return Err(StorageError::InvalidAmount);
        }

        let withdrawn = std::cmp::min(amount, self.gold);
        self.gold -= withdrawn;
        Ok(withdrawn)
    }

    pub fn gold_balance(&self) -> Money {
        self.gold
    }

    /// Largest quantity of `item` that can move from a box into the party.
    pub fn max_withdraw(
        &self,
        box_id: BoxId,
        item: ItemReference,
        inventory: &impl PartyInventory,
    ) -> u32 {
        std::cmp::min(self.count_item(box_id, item), inventory.carry_headroom(item))
    }

    /// Moves up to `quantity` of a carried item into a box, returning the
    /// quantity moved.
    pub fn deposit_item(
        &mut self,
        box_id: BoxId,
        item: ItemReference,
        quantity: u32,
        inventory: &mut impl PartyInventory,
    ) -> Result<u32, StorageError> {
        if quantity == 0 {
            return Err(StorageError::InvalidAmount);
        }

        let quantity = std::cmp::min(quantity, inventory.on_hand_count(item));
        if quantity == 0 {
            return Err(StorageError::UnknownItem);
        }

        inventory.lose(item, quantity);
        self.add_item(box_id, item, quantity)?;
        Ok(quantity)
    }

    /// Moves up to `quantity` of a stored item back to the party, never above
    /// the party's carry cap. Returns the quantity moved.
    pub fn withdraw_item(
        &mut self,
        box_id: BoxId,
        item: ItemReference,
        quantity: u32,
        inventory: &mut impl PartyInventory,
    ) -> Result<u32, StorageError> {
        if quantity == 0 {
            return Err(StorageError::InvalidAmount);
        }

        if self.count_item(box_id, item) == 0 {
            return Err(StorageError::UnknownItem);
        }

        let quantity = std::cmp::min(quantity, self.max_withdraw(box_id, item, &*inventory));
        if quantity == 0 {
            return Err(StorageError::CapacityExceeded);
        }

        let removed = self.remove_item(box_id, item, quantity)?;
        inventory.gain(item, removed);
        Ok(removed)
    }
}
