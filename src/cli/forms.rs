use chrono::Local;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use spendwise_domain::{CategoryCatalog, ExpenseDraft};

use crate::cli::core::CommandError;

/// Collects an expense draft interactively, pre-filled from `initial` when editing.
pub fn expense_form(
    theme: &ColorfulTheme,
    catalog: &CategoryCatalog,
    initial: Option<&ExpenseDraft>,
) -> Result<ExpenseDraft, CommandError> {
    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();

    let title = text_field(theme, "Title", initial.map(|draft| draft.title.as_str()))?;
    let price = text_field(theme, "Price", initial.map(|draft| draft.price.as_str()))?;

    let names: Vec<&str> = catalog.iter().map(|category| category.as_str()).collect();
    let default_index = initial
        .and_then(|draft| {
            names
                .iter()
                .position(|name| name.eq_ignore_ascii_case(draft.category.trim()))
        })
        .unwrap_or(0);
    let index = Select::with_theme(theme)
        .with_prompt("Category")
        .items(&names)
        .default(default_index)
        .interact()?;
    let category = names.get(index).copied().unwrap_or_default();

    let date = text_field(
        theme,
        "Date (YYYY-MM-DD)",
        Some(initial.map(|draft| draft.date.as_str()).unwrap_or(&today)),
    )?;

    Ok(ExpenseDraft::new(title, price, category, date))
}

fn text_field(
    theme: &ColorfulTheme,
    prompt: &str,
    initial: Option<&str>,
) -> Result<String, CommandError> {
    let mut input = Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .allow_empty(true);
    if let Some(value) = initial {
        input = input.with_initial_text(value);
    }
    Ok(input.interact_text()?)
}
