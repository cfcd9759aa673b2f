use bevy_ecs::prelude::{Entity, Event};

/// A script call issued by a game event on behalf of a party, such as
/// `store_add weapon 5 20`.
#[derive(Event, Clone, Debug)]
pub struct ScriptEvent {
    pub entity: Entity,
    pub command: String,
}

impl ScriptEvent {
    pub fn new(entity: Entity, command: &str) -> Self {
        Self {
            entity,
            command: command.to_string(),
        }
    }
}
