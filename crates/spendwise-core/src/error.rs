use std::fmt;
use std::io;

use rust_decimal::Decimal;
use spendwise_domain::ExpenseId;
use thiserror::Error;

/// Form fields that must be present on an expense draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Price,
    Category,
    Date,
    Amount,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DraftField::Title => "title",
            DraftField::Price => "price",
            DraftField::Category => "category",
            DraftField::Date => "date",
            DraftField::Amount => "amount",
        };
        f.write_str(label)
    }
}

/// Reasons a ledger operation is rejected. The prior state is always left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Missing field: {0}")]
    MissingField(DraftField),
    #[error("Insufficient balance: {required} required, {available} available")]
    InsufficientBalance {
        required: Decimal,
        available: Decimal,
    },
    #[error("Expense not found: {0}")]
    NotFound(ExpenseId),
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Failures raised by key-value storage backends.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Storage error: {0}")]
    Storage(String),
}
