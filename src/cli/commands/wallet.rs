use spendwise_domain::ExpenseDraft;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::forms;
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("balance", "Show the wallet balance", "balance", cmd_balance),
        CommandEntry::new("income", "Add income to the wallet", "income <amount>", cmd_income),
        CommandEntry::new(
            "add",
            "Record an expense",
            "add <title> <price> <category> <date>",
            cmd_add,
        ),
        CommandEntry::new(
            "edit",
            "Change an expense",
            "edit <id> <title> <price> <category> <date>",
            cmd_edit,
        ),
        CommandEntry::new("delete", "Remove an expense and refund it", "delete <id>", cmd_delete),
        CommandEntry::new("list", "List recorded expenses", "list", cmd_list),
    ]
}

fn usage(command: &str, usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("Usage: {usage} (see `help {command}`)"))
}

fn draft_from_args(args: &[&str]) -> Option<ExpenseDraft> {
    match args {
        [title, price, category, date] => Some(ExpenseDraft::new(*title, *price, *category, *date)),
        _ => None,
    }
}

fn cmd_balance(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::info(format!(
        "Balance: {}",
        context.format_amount(context.wallet.balance())
    ));
    Ok(())
}

fn cmd_income(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [amount] = args else {
        return Err(usage("income", "income <amount>"));
    };
    let outcome = context.wallet.add_income(amount)?;
    context.report_outcome(&outcome);
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let draft = match draft_from_args(args) {
        Some(draft) => draft,
        None if args.is_empty() && context.can_prompt() => {
            forms::expense_form(&context.theme, context.wallet.service().catalog(), None)?
        }
        None => return Err(usage("add", "add <title> <price> <category> <date>")),
    };
    let outcome = context.wallet.add_expense(&draft)?;
    context.report_outcome(&outcome);
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((reference, rest)) = args.split_first() else {
        return Err(usage("edit", "edit <id> <title> <price> <category> <date>"));
    };
    let record = context.resolve_expense(reference)?;
    let draft = match draft_from_args(rest) {
        Some(draft) => draft,
        None if rest.is_empty() && context.can_prompt() => forms::expense_form(
            &context.theme,
            context.wallet.service().catalog(),
            Some(&record.to_draft()),
        )?,
        None => return Err(usage("edit", "edit <id> <title> <price> <category> <date>")),
    };
    let outcome = context.wallet.edit_expense(record.id, &draft)?;
    context.report_outcome(&outcome);
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [reference] = args else {
        return Err(usage("delete", "delete <id>"));
    };
    let record = context.resolve_expense(reference)?;
    let outcome = context.wallet.delete_expense(record.id)?;
    context.report_outcome(&outcome);
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Expenses");
    if context.wallet.expenses().is_empty() {
        output::info("No expenses recorded.");
    } else {
        output::info(format!(
            "{:<8}  {:<10}  {:<24}  {:<14}  {:>12}",
            "ID", "DATE", "TITLE", "CATEGORY", "PRICE"
        ));
        for record in context.wallet.expenses() {
            output::info(format!(
                "{:<8}  {:<10}  {:<24}  {:<14}  {:>12}",
                record.id.short(),
                record.date.format("%Y-%m-%d").to_string(),
                record.title,
                record.category.as_str(),
                context.format_amount(record.price)
            ));
        }
    }
    output::info(format!(
        "Balance: {}",
        context.format_amount(context.wallet.balance())
    ));
    Ok(())
}
