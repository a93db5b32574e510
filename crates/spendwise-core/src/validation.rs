//! Explicit parse-and-validate steps for user-entered form text.

use std::{collections::HashSet, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendwise_domain::{Category, CategoryCatalog, ExpenseDraft, LedgerState};

use crate::error::{DraftField, LedgerError};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Draft fields after parsing; every value is known to be well formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidExpense {
    pub title: String,
    pub price: Decimal,
    pub category: Category,
    pub date: NaiveDate,
}

/// Parses a strictly positive monetary amount.
///
/// Blank input is reported as a missing amount; anything that is not a
/// finite decimal greater than zero is an invalid amount.
pub fn parse_amount(text: &str) -> Result<Decimal, LedgerError> {
    parse_positive(text, DraftField::Amount)
}

/// Rejects zero and negative amounts.
pub fn ensure_positive(amount: Decimal) -> Result<Decimal, LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(format!(
            "{amount} must be greater than zero"
        )));
    }
    Ok(amount)
}

pub fn parse_date(text: &str) -> Result<NaiveDate, LedgerError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::MissingField(DraftField::Date));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| LedgerError::InvalidDate(format!("`{trimmed}` is not a YYYY-MM-DD date")))
}

/// Validates every draft field in form order: title, price, category, date.
pub fn validate_draft(
    draft: &ExpenseDraft,
    catalog: &CategoryCatalog,
) -> Result<ValidExpense, LedgerError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(LedgerError::MissingField(DraftField::Title));
    }
    let price = parse_positive(&draft.price, DraftField::Price)?;
    let category_name = draft.category.trim();
    if category_name.is_empty() {
        return Err(LedgerError::MissingField(DraftField::Category));
    }
    let category = catalog
        .resolve(category_name)
        .cloned()
        .ok_or_else(|| LedgerError::UnknownCategory(category_name.to_string()))?;
    let date = parse_date(&draft.date)?;
    Ok(ValidExpense {
        title: title.to_string(),
        price,
        category,
        date,
    })
}

fn parse_positive(text: &str, field: DraftField) -> Result<Decimal, LedgerError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::MissingField(field));
    }
    let amount = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| LedgerError::InvalidAmount(format!("`{trimmed}` is not a number")))?;
    ensure_positive(amount)
}

/// Detects invariant violations within a ledger snapshot that did not come
/// from a ledger operation, such as hand-edited or legacy persisted data.
pub fn ledger_warnings(state: &LedgerState) -> Vec<String> {
    let mut warnings = Vec::new();
    if state.balance < Decimal::ZERO {
        warnings.push(format!("balance {} is negative", state.balance));
    }
    let mut seen = HashSet::new();
    for record in &state.expenses {
        if !seen.insert(record.id) {
            warnings.push(format!("expense {} appears more than once", record.id));
        }
        if record.price <= Decimal::ZERO {
            warnings.push(format!(
                "expense {} has non-positive price {}",
                record.id, record.price
            ));
        }
        if record.title.trim().is_empty() {
            warnings.push(format!("expense {} has a blank title", record.id));
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendwise_domain::{ExpenseId, ExpenseRecord};

    fn draft(title: &str, price: &str, category: &str, date: &str) -> ExpenseDraft {
        ExpenseDraft::new(title, price, category, date)
    }

    #[test]
    fn parse_amount_accepts_plain_and_scientific() {
        assert_eq!(parse_amount(" 12.50 ").unwrap(), Decimal::new(1250, 2));
        assert_eq!(parse_amount("1e3").unwrap(), Decimal::from(1000));
    }

    #[test]
    fn parse_amount_rejects_garbage_and_non_positive() {
        for input in ["abc", "NaN", "inf", "0", "-5", "12,5"] {
            let err = parse_amount(input).expect_err(input);
            assert!(
                matches!(err, LedgerError::InvalidAmount(_)),
                "unexpected error for {input}: {err:?}"
            );
        }
        assert_eq!(
            parse_amount("   ").unwrap_err(),
            LedgerError::MissingField(DraftField::Amount)
        );
    }

    #[test]
    fn validate_reports_first_missing_field_in_form_order() {
        let catalog = CategoryCatalog::default();
        let cases = [
            (draft("", "", "", ""), DraftField::Title),
            (draft("Lunch", "", "", ""), DraftField::Price),
            (draft("Lunch", "5", " ", ""), DraftField::Category),
            (draft("Lunch", "5", "Food", ""), DraftField::Date),
        ];
        for (input, field) in cases {
            assert_eq!(
                validate_draft(&input, &catalog).unwrap_err(),
                LedgerError::MissingField(field)
            );
        }
    }

    #[test]
    fn validate_canonicalizes_category_and_trims_title() {
        let catalog = CategoryCatalog::default();
        let valid = validate_draft(&draft("  Lunch ", "200", "food", "2024-01-01"), &catalog)
            .expect("valid draft");
        assert_eq!(valid.title, "Lunch");
        assert_eq!(valid.category.as_str(), "Food");
        assert_eq!(valid.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn validate_rejects_unknown_category_and_bad_date() {
        let catalog = CategoryCatalog::default();
        assert!(matches!(
            validate_draft(&draft("Rent", "900", "Housing", "2024-01-01"), &catalog),
            Err(LedgerError::UnknownCategory(name)) if name == "Housing"
        ));
        assert!(matches!(
            validate_draft(&draft("Rent", "900", "Food", "01/02/2024"), &catalog),
            Err(LedgerError::InvalidDate(_))
        ));
    }

    #[test]
    fn warnings_flag_duplicates_and_bad_prices() {
        let id = ExpenseId::random();
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let record = ExpenseRecord::new(id, " ", Decimal::ZERO, Category::new("Food"), date);
        let state = LedgerState::with_expenses(
            Decimal::from(-1),
            vec![record.clone(), record],
        );
        let warnings = ledger_warnings(&state);
        assert!(warnings.iter().any(|w| w.contains("negative")));
        assert!(warnings.iter().any(|w| w.contains("more than once")));
        assert!(warnings.iter().any(|w| w.contains("non-positive")));
        assert!(warnings.iter().any(|w| w.contains("blank title")));
    }

    #[test]
    fn consistent_state_has_no_warnings() {
        assert!(ledger_warnings(&LedgerState::default()).is_empty());
    }
}
