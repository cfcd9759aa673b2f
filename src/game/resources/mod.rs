mod game_data;
mod game_variables;
mod storage_config;

pub use game_data::GameData;
pub use game_variables::{GameVariables, VariableBoxSelector};
pub use storage_config::{CommandLabels, SoundEffect, StorageConfig};
