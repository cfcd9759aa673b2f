mod storage_game;

pub mod components;
pub mod events;
pub mod messages;
pub mod resources;
pub mod storage;
pub mod systems;

pub use storage_game::StorageGame;
