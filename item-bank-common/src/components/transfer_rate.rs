use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use crate::components::{Money, PartyInventory, StorageError, StorageLedger};

#[derive(Copy, Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum TransferDirection {
    #[default]
    None,
    Depositing,
    Withdrawing,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GoldBalances {
    pub on_hand: Money,
    pub banked: Money,
    pub gold_cap: Money,
}

impl GoldBalances {
    pub fn new(ledger: &StorageLedger, inventory: &impl PartyInventory) -> Self {
        Self {
            on_hand: inventory.on_hand_gold(),
            banked: ledger.gold_balance(),
            gold_cap: inventory.gold_cap(),
        }
    }

    pub fn depositable(&self) -> Money {
        self.on_hand
    }

    pub fn withdrawable(&self) -> Money {
        std::cmp::min(self.banked, self.gold_cap - self.on_hand)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GoldTransfer {
    Deposit(Money),
    Withdraw(Money),
}

impl GoldTransfer {
    pub fn amount(&self) -> Money {
        match *self {
            GoldTransfer::Deposit(amount) | GoldTransfer::Withdraw(amount) => amount,
        }
    }

    pub fn apply(
        self,
        ledger: &mut StorageLedger,
        inventory: &mut impl PartyInventory,
    ) -> Result<(), StorageError> {
        match self {
            GoldTransfer::Deposit(amount) => {
                let amount = std::cmp::min(amount, inventory.on_hand_gold());
                ledger.deposit_gold(amount)?;
                inventory.lose_gold(amount);
            }
            GoldTransfer::Withdraw(amount) => {
                let amount = std::cmp::min(amount, inventory.gold_headroom());
                let withdrawn = ledger.withdraw_gold(amount)?;
                inventory.gain_gold(withdrawn);
            }
        }

        Ok(())
    }
}

/// Accelerates gold transfers while a direction is held.
///
/// Each consecutive tick in the same direction moves one more gold than the
/// last, any change of direction (including release) starts again from 1.
#[derive(Component, Debug, PartialEq, Eq)]
pub struct TransferRateController {
    rate: i64,
    direction: TransferDirection,
}

impl Default for TransferRateController {
    fn default() -> Self {
        Self {
            rate: 1,
            direction: TransferDirection::None,
        }
    }
}

impl TransferRateController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rate(&self) -> i64 {
        self.rate
    }

    pub fn direction(&self) -> TransferDirection {
        self.direction
    }

    pub fn is_idle(&self) -> bool {
        self.direction == TransferDirection::None
    }

    pub fn release(&mut self) {
        self.direction = TransferDirection::None;
        self.rate = 1;
    }

    pub fn tick(
        &mut self,
        held: TransferDirection,
        balances: GoldBalances,
    ) -> Option<GoldTransfer> {
        if held != self.direction {
            self.direction = held;
            self.rate = 1;
        }

        let rate = Money(self.rate);
        let transfer = match held {
            TransferDirection::None => return None,
            TransferDirection::Depositing => {
                GoldTransfer::Deposit(std::cmp::min(rate, balances.depositable()))
            }
            TransferDirection::Withdrawing => {
                GoldTransfer::Withdraw(std::cmp::min(rate, balances.withdrawable()))
            }
        };

        if transfer.amount().is_zero() {
            return None;
        }

        self.rate = self.rate.saturating_add(1);
        Some(transfer)
    }

    /// Moves everything eligible in one go, ignored while a direction is held.
    pub fn transfer_all(
        &self,
        direction: TransferDirection,
        balances: GoldBalances,
    ) -> Option<GoldTransfer> {
        if !self.is_idle() {
            return None;
        }

        let transfer = match direction {
            TransferDirection::None => return None,
            TransferDirection::Depositing => GoldTransfer::Deposit(balances.depositable()),
            TransferDirection::Withdrawing => GoldTransfer::Withdraw(balances.withdrawable()),
        };

        if transfer.amount().is_zero() {
            None
        } else {
            Some(transfer)
        }
    }
}
