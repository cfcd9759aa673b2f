use std::collections::HashMap;

use item_bank_data::ItemReference;

use crate::components::{Money, PartyInventory};

pub struct TestParty {
    pub items: HashMap<ItemReference, u32>,
    pub item_cap: u32,
    pub gold: Money,
    pub gold_cap: Money,
}

impl TestParty {
    pub fn new(item_cap: u32, gold_cap: Money) -> Self {
        Self {
            items: HashMap::new(),
            item_cap,
            gold: Money::ZERO,
            gold_cap,
        }
    }

    pub fn with_gold(mut self, gold: Money) -> Self {
        self.gold = gold;
        self
    }
}

impl PartyInventory for TestParty {
    fn on_hand_count(&self, item: ItemReference) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    fn carry_cap(&self, _item: ItemReference) -> u32 {
        self.item_cap
    }

    fn gain(&mut self, item: ItemReference, amount: u32) {
        *self.items.entry(item).or_insert(0) += amount;
    }

    fn lose(&mut self, item: ItemReference, amount: u32) {
        if let Some(quantity) = self.items.get_mut(&item) {
            *quantity = quantity.saturating_sub(amount);
            if *quantity == 0 {
                self.items.remove(&item);
            }
        }
    }

    fn on_hand_gold(&self) -> Money {
        self.gold
    }

    fn gold_cap(&self) -> Money {
        self.gold_cap
    }

    fn gain_gold(&mut self, amount: Money) {
        self.gold += amount;
    }

    fn lose_gold(&mut self, amount: Money) {
        self.gold -= amount;
    }
}
