use item_bank_common::components::{BoxId, Money};
use item_bank_data::ItemReference;

use crate::game::resources::{CommandLabels, SoundEffect};

#[derive(Clone, Debug, PartialEq)]
pub enum StorageMessage {
    Open {
        box_id: BoxId,
        commands: CommandLabels,
        items: Vec<(ItemReference, u32)>,
        carried_gold: Money,
        banked_gold: Money,
    },
    BoxUpdated {
        box_id: BoxId,
        item: ItemReference,
        stored: u32,
        carried: u32,
    },
    /// The take list should close, nothing is left in the box.
    BoxEmptied {
        box_id: BoxId,
    },
    GoldUpdated {
        carried_gold: Money,
        banked_gold: Money,
    },
    PlaySound(SoundEffect),
    Buzzer,
    ScriptResult {
        command: String,
        value: i64,
    },
}
