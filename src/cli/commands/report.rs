use spendwise_core::SummaryService;

use crate::cli::charts;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Spending per category",
            "summary [name|total]",
            cmd_summary,
        ),
        CommandEntry::new("chart", "Category shares and bars", "chart", cmd_chart),
        CommandEntry::new("trend", "Spending per month", "trend", cmd_trend),
        CommandEntry::new("categories", "List configured categories", "categories", cmd_categories),
    ]
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let state = context.wallet.state();
    let rows = match args.first().map(|arg| arg.to_ascii_lowercase()).as_deref() {
        None => SummaryService::summarize_by_category(state),
        Some("name") => SummaryService::sorted_by_name(state),
        Some("total") => SummaryService::sorted_by_total(state),
        Some(other) => {
            return Err(CommandError::InvalidArguments(format!(
                "Unknown ordering `{other}`; use `name` or `total`."
            )))
        }
    };

    output::section("Spending by category");
    if rows.is_empty() {
        output::info("No expenses recorded.");
        return Ok(());
    }
    for row in &rows {
        output::info(format!(
            "{:<16} {:>12}",
            row.category.as_str(),
            context.format_amount(row.total)
        ));
    }
    output::info(format!(
        "{:<16} {:>12}",
        "Total",
        context.format_amount(SummaryService::total_spent(state))
    ));
    Ok(())
}

fn cmd_chart(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let shares = context
        .wallet
        .category_shares(context.config.currency_precision);
    if shares.is_empty() {
        output::info("No expenses recorded.");
        return Ok(());
    }
    let format = |amount: rust_decimal::Decimal| context.format_amount(amount);

    output::section("Share of spending");
    for line in charts::share_rows(&shares, format) {
        output::info(line);
    }
    output::section("Spending by category");
    for line in charts::category_rows(&context.wallet.category_totals(), format) {
        output::info(line);
    }
    Ok(())
}

fn cmd_trend(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let months = context.wallet.monthly_trend();
    output::section("Monthly spending");
    if months.is_empty() {
        output::info("No expenses recorded.");
        return Ok(());
    }
    for line in charts::trend_rows(&months, |amount| context.format_amount(amount)) {
        output::info(line);
    }
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Categories");
    for category in context.wallet.service().catalog().iter() {
        output::info(format!("  {}", category));
    }
    Ok(())
}
