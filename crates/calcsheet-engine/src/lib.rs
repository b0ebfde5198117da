//! calcsheet_engine - Line engine + Rhai integration.

pub mod builtins;
pub mod engine;
