//! Expense records and the raw drafts submitted by forms.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{category::Category, common::*};

/// Stable identity of an expense record. Survives edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(Uuid);

impl ExpenseId {
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// First eight hex digits, enough to address a record in a short listing.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }

    /// Returns `true` when the hyphen-less hex form starts with `prefix`.
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        let needle: String = prefix
            .chars()
            .filter(|c| *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        !needle.is_empty() && self.0.simple().to_string().starts_with(&needle)
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExpenseId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

impl From<Uuid> for ExpenseId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// A single categorized, dated, priced debit against the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    pub title: String,
    pub price: Decimal,
    pub category: Category,
    pub date: NaiveDate,
}

impl ExpenseRecord {
    pub fn new(
        id: ExpenseId,
        title: impl Into<String>,
        price: Decimal,
        category: Category,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            category,
            date,
        }
    }

    /// Produces a draft pre-filled with this record's values, as an edit form would.
    pub fn to_draft(&self) -> ExpenseDraft {
        ExpenseDraft::new(
            self.title.clone(),
            self.price.to_string(),
            self.category.as_str(),
            self.date.format("%Y-%m-%d").to_string(),
        )
    }
}

impl Amounted for ExpenseRecord {
    fn amount(&self) -> Decimal {
        self.price
    }
}

/// Raw, unvalidated field values of an expense form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub title: String,
    pub price: String,
    pub category: String,
    pub date: String,
}

impl ExpenseDraft {
    pub fn new(
        title: impl Into<String>,
        price: impl Into<String>,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            price: price.into(),
            category: category.into(),
            date: date.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ExpenseRecord {
        ExpenseRecord::new(
            ExpenseId::new(Uuid::from_u128(0xabcdef01_0000_0000_0000_000000000001)),
            "Lunch",
            Decimal::from(200),
            Category::new("Food"),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    #[test]
    fn short_id_and_prefix_match() {
        let record = sample();
        assert_eq!(record.id.short(), "abcdef01");
        assert!(record.id.matches_prefix("ABCD"));
        assert!(!record.id.matches_prefix(""));
        assert!(!record.id.matches_prefix("ffff"));
    }

    #[test]
    fn draft_from_record_keeps_field_text() {
        let draft = sample().to_draft();
        assert_eq!(draft, ExpenseDraft::new("Lunch", "200", "Food", "2024-01-01"));
    }

    #[test]
    fn record_serializes_with_five_keys() {
        let json = serde_json::to_value(sample()).unwrap();
        let object = json.as_object().unwrap();
        let mut keys: Vec<_> = object.keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["category", "date", "id", "price", "title"]);
        assert_eq!(object["date"], "2024-01-01");
    }
}
