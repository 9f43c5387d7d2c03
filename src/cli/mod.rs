//! CLI command handlers for clubwatch

pub mod log;
pub mod process;

pub use log::{handle_log_command, LogCommands};
pub use process::handle_process_command;
