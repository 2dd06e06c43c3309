//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the sheetcraft binary.

mod activities;
mod commands;
mod generate;
mod repair;

pub use activities::handle_activities_command;
pub use commands::{Cli, Commands, GenerateArgs};
pub use generate::handle_generate_command;
pub use repair::handle_repair_command;
