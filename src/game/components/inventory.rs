use bevy_ecs::prelude::Component;
use std::collections::HashMap;

use item_bank_common::components::{Money, PartyInventory};
use item_bank_data::ItemReference;

pub const DEFAULT_ITEM_CARRY_CAP: u32 = 99;
pub const DEFAULT_GOLD_CAP: Money = Money(99_999_999);

/// Items and gold carried by the party.
#[derive(Component, Clone, Debug)]
pub struct Inventory {
    pub items: HashMap<ItemReference, u32>,
    pub money: Money,
    pub max_item_quantity: u32,
    pub max_money: Money,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            items: HashMap::new(),
            money: Money::ZERO,
            max_item_quantity: DEFAULT_ITEM_CARRY_CAP,
            max_money: DEFAULT_GOLD_CAP,
        }
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_money(mut self, money: Money) -> Self {
        self.money = money;
        self
    }

    pub fn with_item(mut self, item: ItemReference, quantity: u32) -> Self {
        self.gain(item, quantity);
        self
    }
}

impl PartyInventory for Inventory {
    fn on_hand_count(&self, item: ItemReference) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    fn carry_cap(&self, _item: ItemReference) -> u32 {
        self.max_item_quantity
    }

    fn gain(&mut self, item: ItemReference, amount: u32) {
        if amount > 0 {
            let quantity = self.items.entry(item).or_insert(0);
            *quantity = quantity.saturating_add(amount);
        }
    }

    fn lose(&mut self, item: ItemReference, amount: u32) {
        if let Some(quantity) = self.items.get_mut(&item) {
            if *quantity <= amount {
                self.items.remove(&item);
            } else {
                *quantity -= amount;
            }
        }
    }

    fn on_hand_gold(&self) -> Money {
        self.money
    }

    fn gold_cap(&self) -> Money {
        self.max_money
    }

    fn gain_gold(&mut self, amount: Money) {
        self.money += amount;
    }

    fn lose_gold(&mut self, amount: Money) {
        self.money -= amount;
    }
}
