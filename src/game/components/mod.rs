mod inventory;
mod storage_client;

pub use inventory::{Inventory, DEFAULT_GOLD_CAP, DEFAULT_ITEM_CARRY_CAP};
pub use storage_client::{StorageClient, StorageMenu};

pub use item_bank_common::components::*;
