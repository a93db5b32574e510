//! Aggregation helpers behind the category and trend charts.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use spendwise_domain::{
    round_for_display, Category, CategoryShare, CategoryTotal, LedgerState, MonthlyTotal,
};

/// Derives read-only views over a ledger state.
///
/// See also: [`spendwise_domain::CategoryTotal`] for the returned rows.
pub struct SummaryService;

impl SummaryService {
    /// Sums prices per category, in the order categories first appear.
    ///
    /// Categories without expenses produce no row. Totals saturate at `Decimal::MAX`.
    pub fn summarize_by_category(state: &LedgerState) -> Vec<CategoryTotal> {
        let mut rows: Vec<CategoryTotal> = Vec::new();
        let mut index: HashMap<&Category, usize> = HashMap::new();
        for record in &state.expenses {
            match index.get(&record.category) {
                Some(&slot) => {
                    rows[slot].total = rows[slot].total.saturating_add(record.price)
                }
                None => {
                    index.insert(&record.category, rows.len());
                    rows.push(CategoryTotal::new(record.category.clone(), record.price));
                }
            }
        }
        rows
    }

    /// Category totals ordered alphabetically by category name.
    pub fn sorted_by_name(state: &LedgerState) -> Vec<CategoryTotal> {
        let mut rows = Self::summarize_by_category(state);
        rows.sort_by(|a, b| a.category.cmp(&b.category));
        rows
    }

    /// Category totals ordered from largest to smallest, ties broken by name.
    pub fn sorted_by_total(state: &LedgerState) -> Vec<CategoryTotal> {
        let mut rows = Self::summarize_by_category(state);
        rows.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.category.cmp(&b.category))
        });
        rows
    }

    /// Each category's percentage of total spending, rounded to `precision`.
    pub fn category_shares(state: &LedgerState, precision: u32) -> Vec<CategoryShare> {
        let rows = Self::summarize_by_category(state);
        let grand_total = rows
            .iter()
            .map(|row| row.total)
            .fold(Decimal::ZERO, Decimal::saturating_add);
        rows.into_iter()
            .map(|row| {
                let percent = if grand_total.is_zero() {
                    Decimal::ZERO
                } else {
                    round_for_display(percent_of(row.total, grand_total), precision)
                };
                CategoryShare {
                    category: row.category,
                    total: row.total,
                    percent,
                }
            })
            .collect()
    }

    /// Spending per calendar month, oldest month first.
    pub fn summarize_by_month(state: &LedgerState) -> Vec<MonthlyTotal> {
        let mut months: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
        for record in &state.expenses {
            let Some(month) = record.date.with_day(1) else {
                continue;
            };
            let total = months.entry(month).or_insert(Decimal::ZERO);
            *total = total.saturating_add(record.price);
        }
        months
            .into_iter()
            .map(|(month, total)| MonthlyTotal { month, total })
            .collect()
    }

    pub fn total_spent(state: &LedgerState) -> Decimal {
        state.total_spent()
    }
}

/// `part` as a percentage of `whole`; `whole` must be non-zero and at least `part`.
fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(whole))
        .unwrap_or_else(|| part / whole * Decimal::ONE_HUNDRED)
}
