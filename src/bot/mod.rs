/// Command definitions and per-command handlers
pub mod commands;
/// Dispatcher wiring for incoming updates
pub mod handlers;
