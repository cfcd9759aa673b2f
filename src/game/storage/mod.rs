mod item_bank;

pub use item_bank::{ItemBankStorage, StoredBox, StoredItem};
