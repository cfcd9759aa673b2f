mod script_system;
mod storage_system;

pub use script_system::{handle_script_command, script_system, ScriptCommandError};
pub use storage_system::storage_system;
