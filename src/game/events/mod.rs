mod script_event;
mod storage_event;

pub use script_event::ScriptEvent;
pub use storage_event::StorageEvent;
