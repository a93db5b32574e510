use std::collections::HashMap;

use crate::cli::core::{CommandResult, ShellContext};

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

/// Commands keyed by name, listed in registration order.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandEntry>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: CommandEntry) {
        let name = entry.name;
        if self.commands.insert(name, entry).is_none() {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(name)
    }

    pub fn list(&self) -> impl Iterator<Item = &CommandEntry> + '_ {
        self.order
            .iter()
            .filter_map(|name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.commands.get(name).map(|entry| entry.handler)
    }

    /// Closest registered name within three edits of `input`.
    pub fn suggest(&self, input: &str) -> Option<&'static str> {
        let needle = input.to_lowercase();
        self.names()
            .map(|name| (strsim::levenshtein(name, &needle), name))
            .filter(|(distance, _)| *distance <= 3)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
        Ok(())
    }

    #[test]
    fn keeps_registration_order_and_ignores_duplicates() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("list", "", "list", noop));
        registry.register(CommandEntry::new("add", "", "add", noop));
        registry.register(CommandEntry::new("list", "", "list", noop));

        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["list", "add"]);
        assert!(registry.handler("add").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn suggests_close_names_only() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("summary", "", "summary", noop));
        registry.register(CommandEntry::new("balance", "", "balance", noop));

        assert_eq!(registry.suggest("sumary"), Some("summary"));
        assert_eq!(registry.suggest("BALANCE"), Some("balance"));
        assert_eq!(registry.suggest("xyzzyplugh"), None);
    }
}
