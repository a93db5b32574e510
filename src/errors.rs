use spendwise_config::ConfigError;
use spendwise_core::{LedgerError, StoreError};
use thiserror::Error;

/// Error type that unifies failures from every layer of the workspace.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Failures that stop the shell itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] AppError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::from(AppError::from(err))
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        CliError::from(AppError::from(err))
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Input(err.to_string())
    }
}
