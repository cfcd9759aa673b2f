use item_bank_data::ItemReference;

use crate::components::Money;

/// The party's carried items and gold, owned by the host game.
///
/// `gain` and `gain_gold` do not clamp, callers are expected to stay within
/// [`PartyInventory::carry_cap`] and [`PartyInventory::gold_cap`].
pub trait PartyInventory {
    fn on_hand_count(&self, item: ItemReference) -> u32;
    fn carry_cap(&self, item: ItemReference) -> u32;
    fn gain(&mut self, item: ItemReference, amount: u32);
    fn lose(&mut self, item: ItemReference, amount: u32);

    fn on_hand_gold(&self) -> Money;
    fn gold_cap(&self) -> Money;
    fn gain_gold(&mut self, amount: Money);
    fn lose_gold(&mut self, amount: Money);

    fn carry_headroom(&self, item: ItemReference) -> u32 {
        self.carry_cap(item)
            .saturating_sub(self.on_hand_count(item))
    }

    fn gold_headroom(&self) -> Money {
        self.gold_cap() - self.on_hand_gold()
    }
}

/// Caps that replace the host defaults, `None` keeps the host's own cap.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PartyLimits {
    pub gold_cap: Option<Money>,
    pub item_cap: Option<u32>,
}

impl PartyLimits {
    /// An override of 0 means "use the host default".
    pub fn from_overrides(gold_cap: i64, item_cap: u32) -> Self {
        Self {
            gold_cap: (gold_cap > 0).then_some(Money(gold_cap)),
            item_cap: (item_cap > 0).then_some(item_cap),
        }
    }

    pub fn apply<'a, I: PartyInventory + ?Sized>(
        &self,
        inventory: &'a mut I,
    ) -> LimitedInventory<'a, I> {
        LimitedInventory {
            inventory,
            limits: *self,
        }
    }
}

pub struct LimitedInventory<'a, I: ?Sized> {
    inventory: &'a mut I,
    limits: PartyLimits,
}

impl<I: PartyInventory + ?Sized> PartyInventory for LimitedInventory<'_, I> {
    fn on_hand_count(&self, item: ItemReference) -> u32 {
        self.inventory.on_hand_count(item)
    }

    fn carry_cap(&self, item: ItemReference) -> u32 {
        self.limits
            .item_cap
            .unwrap_or_else(|| self.inventory.carry_cap(item))
    }

    fn gain(&mut self, item: ItemReference, amount: u32) {
        self.inventory.gain(item, amount)
    }

    fn lose(&mut self, item: ItemReference, amount: u32) {
        self.inventory.lose(item, amount)
    }

    fn on_hand_gold(&self) -> Money {
        self.inventory.on_hand_gold()
    }

    fn gold_cap(&self) -> Money {
        self.limits
            .gold_cap
            .unwrap_or_else(|| self.inventory.gold_cap())
    }

    fn gain_gold(&mut self, amount: Money) {
        self.inventory.gain_gold(amount)
    }

    fn lose_gold(&mut self, amount: Money) {
        self.inventory.lose_gold(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_party::TestParty;

    #[test]
    fn zero_overrides_keep_host_caps() {
        let mut party = TestParty::new(99, Money(9_999_999));
        let limits = PartyLimits::from_overrides(0, 0);
        let limited = limits.apply(&mut party);

        assert_eq!(limited.gold_cap(), Money(9_999_999));
        assert_eq!(limited.carry_cap(ItemReference::weapon(1)), 99);
    }

    #[test]
    fn overrides_replace_host_caps() {
        let mut party = TestParty::new(99, Money(9_999_999)).with_gold(Money(400));
        let potion = ItemReference::consumable(1);
        party.gain(potion, 20);

        let limits = PartyLimits::from_overrides(500, 30);
        let mut limited = limits.apply(&mut party);

        assert_eq!(limited.gold_cap(), Money(500));
        assert_eq!(limited.gold_headroom(), Money(100));
        assert_eq!(limited.carry_cap(potion), 30);
        assert_eq!(limited.carry_headroom(potion), 10);

        limited.gain(potion, 5);
        limited.lose_gold(Money(50));
        assert_eq!(party.on_hand_count(potion), 25);
        assert_eq!(party.gold, Money(350));
    }
}
