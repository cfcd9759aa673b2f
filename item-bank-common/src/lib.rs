pub mod components;
pub mod script_facade;
