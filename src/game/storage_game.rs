use bevy_ecs::{
    prelude::{Entity, Events, IntoSystemConfigs, World},
    schedule::{ExecutorKind, Schedule},
};
use crossbeam_channel::Receiver;

use item_bank_common::{
    components::{
        PartyInventory, QuantityInput, StorageLedger, TransferDirection, TransferRateController,
    },
    script_facade::BoxSelector,
};
use item_bank_data::ItemReference;

use crate::game::{
    components::{Inventory, StorageClient},
    events::{ScriptEvent, StorageEvent},
    messages::StorageMessage,
    resources::{GameData, GameVariables, StorageConfig},
    storage::ItemBankStorage,
    systems::{script_system, storage_system},
};

/// Drives the storage systems, one `update` per input tick.
pub struct StorageGame {
    world: World,
    schedule: Schedule,
}

impl StorageGame {
    pub fn new(config: StorageConfig, game_data: GameData) -> Self {
        let mut world = World::new();
        world.insert_resource(config);
        world.insert_resource(game_data);
        world.insert_resource(GameVariables::new());
        world.init_resource::<Events<ScriptEvent>>();
        world.init_resource::<Events<StorageEvent>>();

        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        schedule.add_systems((script_system, storage_system).chain());

        Self { world, schedule }
    }

    pub fn spawn_party(&mut self, inventory: Inventory) -> (Entity, Receiver<StorageMessage>) {
        self.spawn_party_with_storage(inventory, ItemBankStorage::default())
    }

    pub fn spawn_party_with_storage(
        &mut self,
        inventory: Inventory,
        storage: ItemBankStorage,
    ) -> (Entity, Receiver<StorageMessage>) {
        let (storage_message_tx, storage_message_rx) = crossbeam_channel::unbounded();
        let entity = self
            .world
            .spawn((
                StorageClient::new(storage_message_tx),
                inventory,
                StorageLedger::from(storage),
                TransferRateController::new(),
            ))
            .id();

        (entity, storage_message_rx)
    }

    pub fn send_storage_event(&mut self, event: StorageEvent) {
        self.world
            .resource_mut::<Events<StorageEvent>>()
            .send(event);
    }

    pub fn send_script(&mut self, entity: Entity, command: &str) {
        self.world
            .resource_mut::<Events<ScriptEvent>>()
            .send(ScriptEvent::new(entity, command));
    }

    pub fn set_variable(&mut self, variable_id: usize, value: i32) {
        self.world
            .resource_mut::<GameVariables>()
            .set(variable_id, value);
    }

    pub fn update(&mut self) {
        self.schedule.run(&mut self.world);
        self.world.resource_mut::<Events<ScriptEvent>>().update();
        self.world.resource_mut::<Events<StorageEvent>>().update();
    }

    pub fn ledger(&self, entity: Entity) -> Option<&StorageLedger> {
        self.world.get::<StorageLedger>(entity)
    }

    pub fn inventory(&self, entity: Entity) -> Option<&Inventory> {
        self.world.get::<Inventory>(entity)
    }

    pub fn rate_controller(&self, entity: Entity) -> Option<&TransferRateController> {
        self.world.get::<TransferRateController>(entity)
    }

    pub fn save(&self, entity: Entity) -> Option<ItemBankStorage> {
        self.ledger(entity).map(ItemBankStorage::from)
    }

    /// Number entry for moving `item` in `direction`, `None` when nothing can move.
    pub fn quantity_input(
        &self,
        entity: Entity,
        item: ItemReference,
        direction: TransferDirection,
    ) -> Option<QuantityInput> {
        let config = self.world.resource::<StorageConfig>();
        let box_id = self
            .world
            .resource::<GameVariables>()
            .box_selector(config.box_variable_id)
            .current_box();
        let ledger = self.ledger(entity)?;
        let mut inventory = self.inventory(entity)?.clone();
        let party = config.party_limits().apply(&mut inventory);

        let max = match direction {
            TransferDirection::None => 0,
            TransferDirection::Depositing => party.on_hand_count(item),
            TransferDirection::Withdrawing => ledger.max_withdraw(box_id, item, &party),
        };
        QuantityInput::new(max)
    }
}
