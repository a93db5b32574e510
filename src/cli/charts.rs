//! Text renderings of the summary views.

use rust_decimal::{prelude::ToPrimitive, Decimal};
use spendwise_domain::{CategoryShare, CategoryTotal, MonthlyTotal};

pub const BAR_WIDTH: usize = 30;
const BAR_CHAR: char = '#';

/// A bar proportional to `value / max`, at most `width` cells long.
///
/// Any positive value gets at least one cell so small categories stay visible.
pub fn bar(value: Decimal, max: Decimal, width: usize) -> String {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return String::new();
    }
    let cells = (value / max * Decimal::from(width))
        .round()
        .to_usize()
        .unwrap_or(width)
        .clamp(1, width);
    BAR_CHAR.to_string().repeat(cells)
}

/// Pie chart stand-in: one row per category with its share of spending.
pub fn share_rows<F>(shares: &[CategoryShare], format_amount: F) -> Vec<String>
where
    F: Fn(Decimal) -> String,
{
    shares
        .iter()
        .map(|share| {
            format!(
                "{:<16} {:>12} {:>8} {}",
                share.category.as_str(),
                format_amount(share.total),
                format!("{}%", share.percent),
                bar(share.percent, Decimal::ONE_HUNDRED, BAR_WIDTH)
            )
        })
        .collect()
}

pub fn category_rows<F>(totals: &[CategoryTotal], format_amount: F) -> Vec<String>
where
    F: Fn(Decimal) -> String,
{
    let max = totals
        .iter()
        .map(|row| row.total)
        .max()
        .unwrap_or(Decimal::ZERO);
    totals
        .iter()
        .map(|row| {
            format!(
                "{:<16} {:>12} {}",
                row.category.as_str(),
                format_amount(row.total),
                bar(row.total, max, BAR_WIDTH)
            )
        })
        .collect()
}

pub fn trend_rows<F>(months: &[MonthlyTotal], format_amount: F) -> Vec<String>
where
    F: Fn(Decimal) -> String,
{
    let max = months
        .iter()
        .map(|row| row.total)
        .max()
        .unwrap_or(Decimal::ZERO);
    months
        .iter()
        .map(|row| {
            format!(
                "{:<8} {:>12} {}",
                row.label(),
                format_amount(row.total),
                bar(row.total, max, BAR_WIDTH)
            )
        })
        .collect()
}
