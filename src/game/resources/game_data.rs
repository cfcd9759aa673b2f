use bevy_ecs::prelude::Resource;

use item_bank_data::ItemDatabase;

#[derive(Resource, Default)]
pub struct GameData {
    pub items: ItemDatabase,
}

impl GameData {
    pub fn new(items: ItemDatabase) -> Self {
        Self { items }
    }
}
