use bevy_ecs::prelude::Component;
use crossbeam_channel::Sender;

use item_bank_common::{
    components::{BoxId, Money, StorageLedger},
    script_facade::StorageUi,
};

use crate::game::{messages::StorageMessage, resources::StorageConfig};

/// Where storage messages for a party are sent, normally the menu layer.
#[derive(Component)]
pub struct StorageClient {
    pub storage_message_tx: Sender<StorageMessage>,
}

impl StorageClient {
    pub fn new(storage_message_tx: Sender<StorageMessage>) -> Self {
        Self { storage_message_tx }
    }

    pub fn send(&self, message: StorageMessage) {
        self.storage_message_tx.send(message).ok();
    }

    pub fn buzzer(&self) {
        self.send(StorageMessage::Buzzer);
    }
}

pub struct StorageMenu<'a> {
    pub client: &'a StorageClient,
    pub config: &'a StorageConfig,
    pub carried_gold: Money,
}

impl StorageUi for StorageMenu<'_> {
    fn open_storage(&mut self, box_id: BoxId, ledger: &StorageLedger) {
        self.client.send(StorageMessage::Open {
            box_id,
            commands: self.config.command_labels.clone(),
            items: ledger.box_items(box_id),
            carried_gold: self.carried_gold,
            banked_gold: ledger.gold_balance(),
        });
    }
}
