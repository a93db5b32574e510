pub mod charts;
mod commands;
pub mod core;
pub mod forms;
mod help;
pub mod output;
pub mod registry;
mod shell;

pub use self::core::{CliMode, CommandError, CommandResult, ShellContext};
pub use shell::{run_cli, SCRIPT_ENV};
