use bevy_ecs::prelude::{Entity, Event};

use item_bank_common::components::TransferDirection;
use item_bank_data::ItemReference;

#[derive(Event, Clone, Copy, Debug)]
pub enum StorageEvent {
    Open {
        entity: Entity,
    },
    DepositItem {
        entity: Entity,
        item: ItemReference,
        quantity: u32,
    },
    WithdrawItem {
        entity: Entity,
        item: ItemReference,
        quantity: u32,
    },
    /// Sent every tick a gold direction is held, a tick without one releases.
    HoldGold {
        entity: Entity,
        direction: TransferDirection,
    },
    TransferAllGold {
        entity: Entity,
        direction: TransferDirection,
    },
}
