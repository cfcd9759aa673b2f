use bevy_ecs::prelude::{Entity, EventReader, Mut, Query, Res};
use log::debug;
use std::collections::HashSet;

use item_bank_common::{
    components::{
        BoxId, GoldBalances, GoldTransfer, PartyInventory, QuantityInput, StorageLedger,
        TransferRateController,
    },
    script_facade::{BoxSelector, StorageUi},
};
use item_bank_data::ItemReference;

use crate::game::{
    components::{Inventory, StorageClient, StorageMenu},
    events::StorageEvent,
    messages::StorageMessage,
    resources::{GameData, GameVariables, StorageConfig},
};

fn storage_deposit_item(
    config: &StorageConfig,
    game_data: &GameData,
    box_id: BoxId,
    storage_client: &StorageClient,
    inventory: &mut Mut<Inventory>,
    ledger: &mut Mut<StorageLedger>,
    item: ItemReference,
    quantity: u32,
) {
    if !game_data
        .items
        .get_item(item)
        .map_or(false, |item_data| config.can_store(item_data))
    {
        debug!(target: "storage", "Refused deposit of {:?}, item cannot be stored", item);
        storage_client.buzzer();
        return;
    }

    let mut party = config.party_limits().apply(&mut **inventory);
    let Some(quantity_input) = QuantityInput::new(party.on_hand_count(item)) else {
        debug!(target: "storage", "Refused deposit of {:?}, item not carried", item);
        storage_client.buzzer();
        return;
    };

    match ledger.deposit_item(
        box_id,
        item,
        quantity_input.with_number(quantity).number(),
        &mut party,
    ) {
        Ok(deposited) => {
            debug!(target: "storage", "Deposited {:?} x{} into {:?}", item, deposited, box_id);
            storage_client.send(StorageMessage::PlaySound(config.item_sound.clone()));
            storage_client.send(StorageMessage::BoxUpdated {
                box_id,
                item,
                stored: ledger.count_item(box_id, item),
                carried: party.on_hand_count(item),
            });
        }
        Err(error) => {
            debug!(target: "storage", "Deposit of {:?} failed: {}", item, error);
            storage_client.buzzer();
        }
    }
}

fn storage_withdraw_item(
    config: &StorageConfig,
    box_id: BoxId,
    storage_client: &StorageClient,
    inventory: &mut Mut<Inventory>,
    ledger: &mut Mut<StorageLedger>,
    item: ItemReference,
    quantity: u32,
) {
    if ledger.is_box_empty(box_id) {
        storage_client.buzzer();
        return;
    }

    let mut party = config.party_limits().apply(&mut **inventory);
    let quantity = QuantityInput::new(ledger.max_withdraw(box_id, item, &party))
        .map_or(quantity, |quantity_input| {
            quantity_input.with_number(quantity).number()
        });

    match ledger.withdraw_item(box_id, item, quantity, &mut party) {
        Ok(withdrawn) => {
            debug!(target: "storage", "Withdrew {:?} x{} from {:?}", item, withdrawn, box_id);
            storage_client.send(StorageMessage::PlaySound(config.item_sound.clone()));
            storage_client.send(StorageMessage::BoxUpdated {
                box_id,
                item,
                stored: ledger.count_item(box_id, item),
                carried: party.on_hand_count(item),
            });

            if ledger.is_box_empty(box_id) {
                storage_client.send(StorageMessage::BoxEmptied { box_id });
            }
        }
        Err(error) => {
            debug!(target: "storage", "Withdraw of {:?} failed: {}", item, error);
            storage_client.buzzer();
        }
    }
}

fn storage_apply_gold_transfer(
    config: &StorageConfig,
    storage_client: &StorageClient,
    inventory: &mut Mut<Inventory>,
    ledger: &mut Mut<StorageLedger>,
    transfer: GoldTransfer,
) {
    let mut party = config.party_limits().apply(&mut **inventory);

    match transfer.apply(ledger, &mut party) {
        Ok(()) => {
            debug!(target: "storage", "Gold transfer {:?}", transfer);
            storage_client.send(StorageMessage::PlaySound(config.bank_sound.clone()));
            storage_client.send(StorageMessage::GoldUpdated {
                carried_gold: party.on_hand_gold(),
                banked_gold: ledger.gold_balance(),
            });
        }
        Err(error) => {
            debug!(target: "storage", "Gold transfer {:?} failed: {}", transfer, error);
        }
    }
}

pub fn storage_system(
    mut storage_events: EventReader<StorageEvent>,
    mut query: Query<(
        Entity,
        &StorageClient,
        &mut Inventory,
        &mut StorageLedger,
        &mut TransferRateController,
    )>,
    config: Res<StorageConfig>,
    game_data: Res<GameData>,
    game_variables: Res<GameVariables>,
) {
    let box_selector = game_variables.box_selector(config.box_variable_id);
    let events: Vec<StorageEvent> = storage_events.iter().copied().collect();

    // A party not holding a gold direction in this batch has released it
    let holding_gold: HashSet<Entity> = events
        .iter()
        .filter_map(|event| match *event {
            StorageEvent::HoldGold { entity, .. } => Some(entity),
            _ => None,
        })
        .collect();
    for (entity, _, _, _, mut rate_controller) in query.iter_mut() {
        if !rate_controller.is_idle() && !holding_gold.contains(&entity) {
            rate_controller.release();
        }
    }

    let mut ticked_gold = HashSet::new();
    for event in events {
        let entity = match event {
            StorageEvent::Open { entity }
            | StorageEvent::DepositItem { entity, .. }
            | StorageEvent::WithdrawItem { entity, .. }
            | StorageEvent::HoldGold { entity, .. }
            | StorageEvent::TransferAllGold { entity, .. } => entity,
        };

        let Ok((_, storage_client, mut inventory, mut ledger, mut rate_controller)) =
            query.get_mut(entity)
        else {
            continue;
        };
        let box_id = box_selector.current_box();

        match event {
            StorageEvent::Open { .. } => {
                ledger.ensure_box(box_id);
                StorageMenu {
                    client: storage_client,
                    config: &config,
                    carried_gold: inventory.money,
                }
                .open_storage(box_id, &ledger);
            }
            StorageEvent::DepositItem { item, quantity, .. } => {
                storage_deposit_item(
                    &config,
                    &game_data,
                    box_id,
                    storage_client,
                    &mut inventory,
                    &mut ledger,
                    item,
                    quantity,
                );
            }
            StorageEvent::WithdrawItem { item, quantity, .. } => {
                storage_withdraw_item(
                    &config,
                    box_id,
                    storage_client,
                    &mut inventory,
                    &mut ledger,
                    item,
                    quantity,
                );
            }
            StorageEvent::HoldGold { direction, .. } => {
                if !ticked_gold.insert(entity) {
                    continue;
                }

                let balances = {
                    let party = config.party_limits().apply(&mut *inventory);
                    GoldBalances::new(&ledger, &party)
                };

                if let Some(transfer) = rate_controller.tick(direction, balances) {
                    storage_apply_gold_transfer(
                        &config,
                        storage_client,
                        &mut inventory,
                        &mut ledger,
                        transfer,
                    );
                }
            }
            StorageEvent::TransferAllGold { direction, .. } => {
                if holding_gold.contains(&entity) {
                    continue;
                }

                let balances = {
                    let party = config.party_limits().apply(&mut *inventory);
                    GoldBalances::new(&ledger, &party)
                };

                if let Some(transfer) = rate_controller.transfer_all(direction, balances) {
                    storage_apply_gold_transfer(
                        &config,
                        storage_client,
                        &mut inventory,
                        &mut ledger,
                        transfer,
                    );
                }
            }
        }
    }
}
