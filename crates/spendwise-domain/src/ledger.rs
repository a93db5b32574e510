//! Wallet state, change notifications, and summary rows.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{category::Category, common::*, expense::*};

/// Balance plus the ordered list of recorded expenses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    pub balance: Decimal,
    pub expenses: Vec<ExpenseRecord>,
}

impl LedgerState {
    pub fn new(balance: Decimal) -> Self {
        Self {
            balance,
            expenses: Vec::new(),
        }
    }

    pub fn with_expenses(balance: Decimal, expenses: Vec<ExpenseRecord>) -> Self {
        Self { balance, expenses }
    }

    pub fn expense(&self, id: ExpenseId) -> Option<&ExpenseRecord> {
        self.expenses.iter().find(|record| record.id == id)
    }

    pub fn position(&self, id: ExpenseId) -> Option<usize> {
        self.expenses.iter().position(|record| record.id == id)
    }

    pub fn contains(&self, id: ExpenseId) -> bool {
        self.position(id).is_some()
    }

    /// Sum of the prices of every present expense, saturating at `Decimal::MAX`.
    pub fn total_spent(&self) -> Decimal {
        self.expenses
            .iter()
            .map(Amounted::amount)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}

impl Default for LedgerState {
    fn default() -> Self {
        Self::new(DEFAULT_STARTING_BALANCE)
    }
}

/// Discriminant of a [`LedgerEvent`], stable for presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    IncomeAdded,
    ExpenseAdded,
    ExpenseUpdated,
    ExpenseDeleted,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::IncomeAdded => "income-added",
            EventKind::ExpenseAdded => "expense-added",
            EventKind::ExpenseUpdated => "expense-updated",
            EventKind::ExpenseDeleted => "expense-deleted",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Success notification emitted by every committed ledger operation.
///
/// `balance` is the wallet balance after the change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    IncomeAdded {
        amount: Decimal,
        balance: Decimal,
    },
    ExpenseAdded {
        record: ExpenseRecord,
        balance: Decimal,
    },
    ExpenseUpdated {
        previous: ExpenseRecord,
        current: ExpenseRecord,
        balance: Decimal,
    },
    ExpenseDeleted {
        record: ExpenseRecord,
        balance: Decimal,
    },
}

impl LedgerEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            LedgerEvent::IncomeAdded { .. } => EventKind::IncomeAdded,
            LedgerEvent::ExpenseAdded { .. } => EventKind::ExpenseAdded,
            LedgerEvent::ExpenseUpdated { .. } => EventKind::ExpenseUpdated,
            LedgerEvent::ExpenseDeleted { .. } => EventKind::ExpenseDeleted,
        }
    }

    pub fn balance(&self) -> Decimal {
        match self {
            LedgerEvent::IncomeAdded { balance, .. }
            | LedgerEvent::ExpenseAdded { balance, .. }
            | LedgerEvent::ExpenseUpdated { balance, .. }
            | LedgerEvent::ExpenseDeleted { balance, .. } => *balance,
        }
    }

    /// Short confirmation text for notifications.
    pub fn message(&self) -> &'static str {
        match self.kind() {
            EventKind::IncomeAdded => "Income added!",
            EventKind::ExpenseAdded => "Expense saved!",
            EventKind::ExpenseUpdated => "Expense updated!",
            EventKind::ExpenseDeleted => "Expense deleted!",
        }
    }
}

/// Total spent in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Decimal,
}

impl CategoryTotal {
    pub fn new(category: Category, total: Decimal) -> Self {
        Self { category, total }
    }
}

/// A category's slice of overall spending, as drawn by a pie chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: Category,
    pub total: Decimal,
    pub percent: Decimal,
}

/// Spending within one calendar month; `month` is the first day of that month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub month: NaiveDate,
    pub total: Decimal,
}

impl MonthlyTotal {
    pub fn label(&self) -> String {
        self.month.format("%Y-%m").to_string()
    }
}
