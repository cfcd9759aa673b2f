mod money;
mod party_inventory;
mod quantity_input;
mod storage_ledger;
mod transfer_rate;

pub use money::Money;
pub use party_inventory::{LimitedInventory, PartyInventory, PartyLimits};
pub use quantity_input::QuantityInput;
pub use storage_ledger::{BoxId, StorageError, StorageLedger};
pub use transfer_rate::{GoldBalances, GoldTransfer, TransferDirection, TransferRateController};

#[cfg(test)]
pub(crate) mod test_party;
