//! Encodes a [`LedgerState`] as the `balance` / `expenses` key pair and back.

use std::collections::HashSet;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use spendwise_core::{
    storage::{BALANCE_KEY, EXPENSES_KEY},
    validation::ledger_warnings,
    IdGenerator, KeyValueStore, StoreError,
};
use spendwise_domain::{Category, ExpenseId, ExpenseRecord, LedgerState};

/// Result of reading persisted state, including any fallbacks taken.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub state: LedgerState,
    pub warnings: Vec<String>,
    pub balance_defaulted: bool,
    pub expenses_defaulted: bool,
}

/// Writes both keys in one batch, expenses first. Rewriting the same state
/// is harmless.
pub fn save_state(store: &dyn KeyValueStore, state: &LedgerState) -> Result<(), StoreError> {
    let expenses = encode_expenses(&state.expenses)?;
    let balance = state.balance.to_string();
    store.set_many(&[(EXPENSES_KEY, &expenses), (BALANCE_KEY, &balance)])
}

pub fn encode_expenses(expenses: &[ExpenseRecord]) -> Result<String, StoreError> {
    serde_json::to_string(expenses).map_err(|err| StoreError::Serde(err.to_string()))
}

/// Reads the wallet, substituting defaults for any absent or unreadable key.
///
/// Never fails: storage errors are treated like an absent key and recorded
/// as warnings.
pub fn load_state<G>(
    store: &dyn KeyValueStore,
    default_balance: Decimal,
    ids: &mut G,
) -> LoadReport
where
    G: IdGenerator + ?Sized,
{
    let mut warnings = Vec::new();

    let balance = match read_key(store, BALANCE_KEY, &mut warnings) {
        Some(raw) => match parse_balance(&raw) {
            Some(balance) => Some(balance),
            None => {
                warnings.push(format!(
                    "stored balance `{}` is unreadable; using default {}",
                    raw.trim(),
                    default_balance
                ));
                None
            }
        },
        None => None,
    };
    let balance_defaulted = balance.is_none();
    let balance = balance.unwrap_or(default_balance);

    let expenses = match read_key(store, EXPENSES_KEY, &mut warnings) {
        Some(raw) => match decode_expenses(&raw, ids, &mut warnings) {
            Ok(expenses) => Some(expenses),
            Err(err) => {
                warnings.push(format!("stored expenses are unreadable ({err}); starting empty"));
                None
            }
        },
        None => None,
    };
    let expenses_defaulted = expenses.is_none();
    let state = LedgerState::with_expenses(balance, expenses.unwrap_or_default());
    warnings.extend(ledger_warnings(&state));

    for warning in &warnings {
        warn!(%warning, "wallet load");
    }
    info!(
        balance = %state.balance,
        expenses = state.expenses.len(),
        balance_defaulted,
        expenses_defaulted,
        "wallet loaded"
    );

    LoadReport {
        state,
        warnings,
        balance_defaulted,
        expenses_defaulted,
    }
}

/// Decodes the expense list, tolerating records written by older revisions.
///
/// Records whose id is missing or not a UUID get a fresh id, a repeated id
/// keeps only its first record, and individual unreadable records are
/// skipped. Only a payload that is not a JSON array is an error.
pub fn decode_expenses<G>(
    raw: &str,
    ids: &mut G,
    warnings: &mut Vec<String>,
) -> Result<Vec<ExpenseRecord>, StoreError>
where
    G: IdGenerator + ?Sized,
{
    let values: Vec<Value> =
        serde_json::from_str(raw).map_err(|err| StoreError::Serde(err.to_string()))?;

    let mut records: Vec<ExpenseRecord> = Vec::with_capacity(values.len());
    let mut seen: HashSet<ExpenseId> = HashSet::new();
    let mut pending_ids = Vec::new();

    for (position, value) in values.into_iter().enumerate() {
        let stored: StoredExpense = match serde_json::from_value(value) {
            Ok(stored) => stored,
            Err(err) => {
                warnings.push(format!("skipping expense #{position}: {err}"));
                continue;
            }
        };
        let Some(fields) = stored.fields(position, warnings) else {
            continue;
        };
        match stored.uuid() {
            Some(id) if seen.insert(id) => records.push(fields.into_record(id)),
            Some(id) => warnings.push(format!(
                "skipping expense #{position}: id {id} already used"
            )),
            None => {
                pending_ids.push(records.len());
                records.push(fields.into_record(ExpenseId::random()));
            }
        }
    }

    if !pending_ids.is_empty() {
        warnings.push(format!(
            "assigned new ids to {} expense(s) without one",
            pending_ids.len()
        ));
    }
    for index in pending_ids {
        let id = spendwise_core::id::unused_id(ids, seen.len(), |candidate| {
            seen.contains(&candidate)
        });
        seen.insert(id);
        records[index].id = id;
    }

    Ok(records)
}

fn read_key(store: &dyn KeyValueStore, key: &str, warnings: &mut Vec<String>) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(err) => {
            warnings.push(format!("could not read `{key}`: {err}"));
            None
        }
    }
}

fn parse_balance(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    let balance = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()?;
    (balance >= Decimal::ZERO).then_some(balance)
}

/// Loose on-disk shape of a record. Older revisions stored prices as JSON
/// numbers and ids as millisecond timestamps, or no id at all.
#[derive(Debug, Deserialize)]
struct StoredExpense {
    #[serde(default)]
    id: Option<Value>,
    title: String,
    price: Value,
    category: String,
    date: String,
}

struct RecordFields {
    title: String,
    price: Decimal,
    category: Category,
    date: NaiveDate,
}

impl RecordFields {
    fn into_record(self, id: ExpenseId) -> ExpenseRecord {
        ExpenseRecord::new(id, self.title, self.price, self.category, self.date)
    }
}

impl StoredExpense {
    fn uuid(&self) -> Option<ExpenseId> {
        match self.id.as_ref()? {
            Value::String(text) => Uuid::parse_str(text).ok().map(ExpenseId::new),
            _ => None,
        }
    }

    fn fields(&self, position: usize, warnings: &mut Vec<String>) -> Option<RecordFields> {
        let price = match &self.price {
            Value::String(text) => Decimal::from_str(text.trim()).ok(),
            Value::Number(number) => Decimal::from_str(&number.to_string())
                .or_else(|_| Decimal::from_scientific(&number.to_string()))
                .ok(),
            _ => None,
        };
        let Some(price) = price else {
            warnings.push(format!("skipping expense #{position}: unreadable price"));
            return None;
        };
        if price <= Decimal::ZERO {
            warnings.push(format!(
                "skipping expense #{position}: non-positive price {price}"
            ));
            return None;
        }
        if self.title.trim().is_empty() {
            warnings.push(format!("skipping expense #{position}: blank title"));
            return None;
        }
        let Ok(date) = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d") else {
            warnings.push(format!(
                "skipping expense #{position}: unreadable date `{}`",
                self.date
            ));
            return None;
        };
        Some(RecordFields {
            title: self.title.clone(),
            price,
            category: Category::new(self.category.clone()),
            date,
        })
    }
}
