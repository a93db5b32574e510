//! Shell context, dispatch, and command error reporting.

use std::io;

use dialoguer::theme::ColorfulTheme;
use spendwise_config::{Config, ConfigManager};
use spendwise_core::LedgerError;
use spendwise_domain::ExpenseRecord;
use spendwise_storage_json::{JsonFileStore, StoragePaths};
use tracing::debug;

use super::commands;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};
use crate::core::{Outcome, PrefixMatch, WalletManager};
use crate::errors::{AppError, CliError};
use crate::utils;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    App(#[from] AppError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub wallet: WalletManager,
    pub config: Config,
    pub profile: String,
    pub storage_paths: Option<StoragePaths>,
    pub theme: ColorfulTheme,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    /// Loads config and the default profile's wallet from the resolved home.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let home = utils::resolve_home();
        let config = ConfigManager::with_base_dir(home.clone())?.load()?;
        let data_root = config.data_root.clone().unwrap_or(home);
        let paths = StoragePaths::under(&data_root);
        let profile = config.default_profile.clone();
        let store = JsonFileStore::for_profile(&paths, &profile)?;
        debug!(path = %store.path().display(), "opening wallet");

        let wallet = WalletManager::from_config(&config, Box::new(store));
        let mut context = Self::with_wallet(mode, config, wallet, profile);
        context.storage_paths = Some(paths);
        Ok(context)
    }

    /// Builds a context around an already opened wallet.
    pub fn with_wallet(
        mode: CliMode,
        config: Config,
        wallet: WalletManager,
        profile: String,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        output::set_color_enabled(mode == CliMode::Interactive && config.ui_color_enabled);

        for warning in wallet.load_warnings() {
            output::warning(warning);
        }

        Self {
            mode,
            registry,
            wallet,
            config,
            profile,
            storage_paths: None,
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
        }
    }

    pub fn prompt(&self) -> String {
        format!("spendwise({})> ", self.profile)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub(crate) fn format_amount(&self, amount: rust_decimal::Decimal) -> String {
        self.config.format_amount(amount)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match super::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(err);
                return Ok(LoopControl::Continue);
            }
        };

        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
        self.last_command = Some(line.trim().to_string());

        let control = self.dispatch(&command, raw, &args)?;
        if control == LoopControl::Exit {
            self.running = false;
        }
        Ok(control)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(best) = self.registry.suggest(input) {
            output::hint(format!("Did you mean `{}`?", best));
        }
    }

    /// Prints a rejection; the shell keeps running.
    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            other => output::error(other),
        }
    }

    /// Announces a committed operation and the resulting balance.
    pub(crate) fn report_outcome(&self, outcome: &Outcome) {
        output::success(outcome.event.message());
        output::info(format!(
            "Balance: {}",
            self.format_amount(outcome.event.balance())
        ));
        if !outcome.persisted {
            output::warning("Changes could not be saved; they are kept for this session only.");
        }
    }

    /// Resolves an id or unique id prefix to a stored expense.
    pub(crate) fn resolve_expense(&self, reference: &str) -> Result<ExpenseRecord, CommandError> {
        match self.wallet.find_by_prefix(reference) {
            PrefixMatch::Unique(record) => Ok(record.clone()),
            PrefixMatch::None => Err(CommandError::InvalidArguments(format!(
                "No expense matches id `{}`.",
                reference
            ))),
            PrefixMatch::Ambiguous(count) => Err(CommandError::InvalidArguments(format!(
                "Id `{}` matches {} expenses; type more characters.",
                reference, count
            ))),
        }
    }
}
