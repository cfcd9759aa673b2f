use log::debug;
use thiserror::Error;

use item_bank_data::{ItemDatabase, ItemKind, ItemReference, ParseItemKindError};

use crate::components::{BoxId, Money, StorageError, StorageLedger};

/// Picks which box script calls and the storage menu operate on.
pub trait BoxSelector {
    fn current_box(&self) -> BoxId;
}

impl BoxSelector for BoxId {
    fn current_box(&self) -> BoxId {
        *self
    }
}

pub trait ItemCatalog {
    fn resolve_item(&self, item_kind: ItemKind, item_number: usize) -> Option<ItemReference>;
}

impl ItemCatalog for ItemDatabase {
    fn resolve_item(&self, item_kind: ItemKind, item_number: usize) -> Option<ItemReference> {
        self.resolve(item_kind, item_number)
    }
}

/// Presents the storage menu for a box.
pub trait StorageUi {
    fn open_storage(&mut self, box_id: BoxId, ledger: &StorageLedger);
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error(transparent)]
    InvalidItemKind(#[from] ParseItemKindError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The calls game event scripts can make against the storage ledger.
pub struct ScriptFacade<'a, C: ?Sized, S: ?Sized> {
    ledger: &'a mut StorageLedger,
    catalog: &'a C,
    box_selector: &'a S,
}

impl<'a, C: ItemCatalog + ?Sized, S: BoxSelector + ?Sized> ScriptFacade<'a, C, S> {
    pub fn new(ledger: &'a mut StorageLedger, catalog: &'a C, box_selector: &'a S) -> Self {
        Self {
            ledger,
            catalog,
            box_selector,
        }
    }

    fn resolve(
        &self,
        item_kind: &str,
        item_number: usize,
    ) -> Result<Option<ItemReference>, ScriptError> {
        let item_kind = item_kind.parse::<ItemKind>()?;
        Ok(self.catalog.resolve_item(item_kind, item_number))
    }

    pub fn store_add(
        &mut self,
        item_kind: &str,
        item_number: usize,
        amount: u32,
    ) -> Result<(), ScriptError> {
        let item = self
            .resolve(item_kind, item_number)?
            .ok_or(StorageError::UnknownItem)?;
        let box_id = self.box_selector.current_box();

        self.ledger.ensure_box(box_id);
        let quantity = self.ledger.add_item(box_id, item, amount)?;
        debug!(
            target: "storage",
            "store_add {:?} x{} into {:?}, now {}",
            item,
            amount,
            box_id,
            quantity
        );
        Ok(())
    }

    /// Removing an item the box does not hold does nothing.
    pub fn store_rem(
        &mut self,
        item_kind: &str,
        item_number: usize,
        amount: u32,
    ) -> Result<(), ScriptError> {
        let box_id = self.box_selector.current_box();
        self.ledger.ensure_box(box_id);

        let item = match self.resolve(item_kind, item_number)? {
            Some(item) => item,
            None => return Ok(()),
        };

        match self.ledger.remove_item(box_id, item, amount) {
            Ok(removed) => {
                debug!(target: "storage", "store_rem {:?} x{} from {:?}", item, removed, box_id);
                Ok(())
            }
            Err(StorageError::UnknownItem) => Ok(()),
            Err(error) => Err(error.into()),
        }
    }

    pub fn store_count(
        &mut self,
        item_kind: &str,
        item_number: usize,
    ) -> Result<u32, ScriptError> {
        let box_id = self.box_selector.current_box();
        self.ledger.ensure_box(box_id);

        Ok(self
            .resolve(item_kind, item_number)?
            .map_or(0, |item| self.ledger.count_item(box_id, item)))
    }

    pub fn bank_add(&mut self, amount: i64) -> Result<(), ScriptError> {
        let balance = self.ledger.deposit_gold(Money(amount))?;
        debug!(target: "storage", "bank_add {}, balance {}", amount, balance);
        Ok(())
    }

    /// Removing more than the balance empties the bank.
    pub fn bank_rem(&mut self, amount: i64) -> Result<(), ScriptError> {
        let withdrawn = self.ledger.withdraw_gold(Money(amount))?;
        debug!(
            target: "storage",
            "bank_rem {} (removed {}), balance {}",
            amount,
            withdrawn,
            self.ledger.gold_balance()
        );
        Ok(())
    }

    pub fn bank_count(&self) -> Money {
        self.ledger.gold_balance()
    }

    pub fn open_storage(&mut self, ui: &mut impl StorageUi) -> BoxId {
        let box_id = self.box_selector.current_box();
        self.ledger.ensure_box(box_id);
        ui.open_storage(box_id, self.ledger);
        box_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use item_bank_data::ItemData;

    fn catalog() -> ItemDatabase {
        let mut catalog = ItemDatabase::new();
        catalog.insert(ItemReference::consumable(1), ItemData::new("Potion", 50));
        catalog.insert(ItemReference::weapon(5), ItemData::new("Club", 120));
        catalog.insert(ItemReference::armor(1), ItemData::new("Leather Shield", 80));
        catalog
    }

    #[derive(Default)]
    struct RecordingUi {
        opened: Vec<(BoxId, bool)>,
    }

    impl StorageUi for RecordingUi {
        fn open_storage(&mut self, box_id: BoxId, ledger: &StorageLedger) {
            self.opened.push((box_id, ledger.is_box_empty(box_id)));
        }
    }

    #[test]
    fn store_add_count_rem() {
        let catalog = catalog();
        let mut ledger = StorageLedger::new();
        let mut facade = ScriptFacade::new(&mut ledger, &catalog, &BoxId(0));

        facade.store_add("item", 1, 10).unwrap();
        assert_eq!(facade.store_count("item", 1), Ok(10));

        facade.store_rem("item", 1, 15).unwrap();
        assert_eq!(facade.store_count("item", 1), Ok(0));
        assert!(ledger.is_box_empty(BoxId(0)));
    }

    #[test]
    fn bank_rem_clamps_at_zero() {
        let catalog = catalog();
        let mut ledger = StorageLedger::new();
        let mut facade = ScriptFacade::new(&mut ledger, &catalog, &BoxId(0));

        facade.bank_add(100).unwrap();
        assert_eq!(facade.bank_count(), Money(100));
        facade.bank_rem(150).unwrap();
        assert_eq!(facade.bank_count(), Money::ZERO);

        assert_eq!(
            facade.bank_add(-5),
            Err(ScriptError::Storage(StorageError::InvalidAmount))
        );
    }

    #[test]
    fn gold_is_shared_between_boxes() {
        let catalog = catalog();
        let mut ledger = StorageLedger::new();

        ScriptFacade::new(&mut ledger, &catalog, &BoxId(1))
            .bank_add(40)
            .unwrap();
        ScriptFacade::new(&mut ledger, &catalog, &BoxId(2))
            .store_add("weapon", 5, 1)
            .unwrap();

        let facade = ScriptFacade::new(&mut ledger, &catalog, &BoxId(2));
        assert_eq!(facade.bank_count(), Money(40));
        assert_eq!(ledger.count_item(BoxId(1), ItemReference::weapon(5)), 0);
        assert_eq!(ledger.count_item(BoxId(2), ItemReference::weapon(5)), 1);
    }

    #[test]
    fn unknown_items_and_kinds() {
        let catalog = catalog();
        let mut ledger = StorageLedger::new();
        let mut facade = ScriptFacade::new(&mut ledger, &catalog, &BoxId(0));

        assert_eq!(
            facade.store_add("weapon", 99, 1),
            Err(ScriptError::Storage(StorageError::UnknownItem))
        );
        assert_eq!(facade.store_rem("weapon", 99, 1), Ok(()));
        assert_eq!(facade.store_rem("armor", 1, 1), Ok(()));
        assert_eq!(facade.store_count("weapon", 99), Ok(0));
        assert!(matches!(
            facade.store_count("shield", 1),
            Err(ScriptError::InvalidItemKind(_))
        ));
        assert_eq!(
            facade.store_add("item", 1, 0),
            Err(ScriptError::Storage(StorageError::InvalidAmount))
        );
    }

    #[test]
    fn open_storage_creates_box() {
        let catalog = catalog();
        let mut ledger = StorageLedger::new();
        let mut ui = RecordingUi::default();

        let box_id = ScriptFacade::new(&mut ledger, &catalog, &BoxId(3)).open_storage(&mut ui);

        assert_eq!(box_id, BoxId(3));
        assert_eq!(ui.opened, vec![(BoxId(3), true)]);
        assert_eq!(ledger.boxes().collect::<Vec<_>>(), vec![BoxId(3)]);
    }
}
