use spendwise_storage_json::JsonFileStore;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::errors::AppError;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("profiles", "List stored wallet profiles", "profiles", cmd_profiles),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new("help", "Show available commands", "help [command]", cmd_help),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_profiles(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Profiles");
    let Some(paths) = &context.storage_paths else {
        output::info(format!("  {} (in memory)", context.profile));
        return Ok(());
    };
    let profiles = JsonFileStore::list_profiles(paths).map_err(AppError::from)?;
    for name in profiles {
        let marker = if name == context.profile { "*" } else { " " };
        output::info(format!("{marker} {name}"));
    }
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output::section(format!("Spendwise {}", meta.version));
    output::info(format!("  CLI version  : {}", build_info::CLI_VERSION));
    output::info(format!(
        "  Build hash   : {} ({})",
        meta.git_hash, meta.git_status
    ));
    output::info(format!("  Built at     : {}", meta.timestamp));
    output::info(format!("  Target       : {}", meta.target));
    output::info(format!("  Profile      : {}", meta.profile));
    output::info(format!("  Rustc        : {}", meta.rustc));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
