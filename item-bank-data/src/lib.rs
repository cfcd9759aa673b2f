mod item_database;

pub use item_database::{ItemData, ItemDatabase, ItemKind, ItemReference, ParseItemKindError};
