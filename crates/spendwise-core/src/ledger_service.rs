//! The wallet ledger state machine.
//!
//! Every operation reads the current [`LedgerState`] and either returns the
//! next consistent state together with a [`LedgerEvent`], or a
//! [`LedgerError`] explaining the rejection. Validation always completes
//! before any part of the new state is built.

use rust_decimal::Decimal;
use tracing::debug;

use spendwise_domain::{
    CategoryCatalog, ExpenseDraft, ExpenseId, ExpenseRecord, LedgerEvent, LedgerState,
};

use crate::{
    error::LedgerError,
    id::{unused_id, IdGenerator},
    validation::{ensure_positive, parse_amount, validate_draft, ValidExpense},
};

/// Outcome of a committed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerTransition {
    pub state: LedgerState,
    pub event: LedgerEvent,
}

/// Applies income and expense operations against a category catalog.
#[derive(Debug, Clone, Default)]
pub struct LedgerService {
    catalog: CategoryCatalog,
}

impl LedgerService {
    pub fn new(catalog: CategoryCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    /// Credits `amount` to the wallet.
    pub fn add_income(
        &self,
        state: &LedgerState,
        amount: Decimal,
    ) -> Result<LedgerTransition, LedgerError> {
        let amount = ensure_positive(amount)?;
        let balance = credit(state.balance, amount)?;
        let mut next = state.clone();
        next.balance = balance;
        debug!(%amount, balance = %next.balance, "income added");
        Ok(LedgerTransition {
            event: LedgerEvent::IncomeAdded {
                amount,
                balance: next.balance,
            },
            state: next,
        })
    }

    /// Parses `text` as an amount, then credits it.
    pub fn add_income_text(
        &self,
        state: &LedgerState,
        text: &str,
    ) -> Result<LedgerTransition, LedgerError> {
        let amount = parse_amount(text)?;
        self.add_income(state, amount)
    }

    /// Records a new expense and debits its price.
    pub fn add_expense<G>(
        &self,
        state: &LedgerState,
        draft: &ExpenseDraft,
        ids: &mut G,
    ) -> Result<LedgerTransition, LedgerError>
    where
        G: IdGenerator + ?Sized,
    {
        let valid = validate_draft(draft, &self.catalog)?;
        ensure_affordable(valid.price, state.balance)?;

        let id = unused_id(ids, state.expenses.len(), |candidate| {
            state.contains(candidate)
        });
        let record = into_record(id, valid);
        let mut next = state.clone();
        next.balance -= record.price;
        next.expenses.push(record.clone());
        debug!(id = %record.id, price = %record.price, balance = %next.balance, "expense added");
        Ok(LedgerTransition {
            event: LedgerEvent::ExpenseAdded {
                record,
                balance: next.balance,
            },
            state: next,
        })
    }

    /// Replaces the fields of an existing expense, keeping its id and position.
    ///
    /// Only an increase in price has to be covered by the current balance.
    pub fn edit_expense(
        &self,
        state: &LedgerState,
        id: ExpenseId,
        draft: &ExpenseDraft,
    ) -> Result<LedgerTransition, LedgerError> {
        let index = state.position(id).ok_or(LedgerError::NotFound(id))?;
        let valid = validate_draft(draft, &self.catalog)?;
        let previous = state.expenses[index].clone();
        let diff = valid.price - previous.price;
        ensure_affordable(diff, state.balance)?;
        let balance = credit(state.balance, -diff)?;

        let current = into_record(id, valid);
        let mut next = state.clone();
        next.balance = balance;
        next.expenses[index] = current.clone();
        debug!(%id, %diff, balance = %next.balance, "expense updated");
        Ok(LedgerTransition {
            event: LedgerEvent::ExpenseUpdated {
                previous,
                current,
                balance: next.balance,
            },
            state: next,
        })
    }

    /// Removes an expense and refunds its price.
    pub fn delete_expense(
        &self,
        state: &LedgerState,
        id: ExpenseId,
    ) -> Result<LedgerTransition, LedgerError> {
        let index = state.position(id).ok_or(LedgerError::NotFound(id))?;
        let balance = credit(state.balance, state.expenses[index].price)?;
        let mut next = state.clone();
        let record = next.expenses.remove(index);
        next.balance = balance;
        debug!(%id, refund = %record.price, balance = %next.balance, "expense deleted");
        Ok(LedgerTransition {
            event: LedgerEvent::ExpenseDeleted {
                record,
                balance: next.balance,
            },
            state: next,
        })
    }
}

fn ensure_affordable(required: Decimal, available: Decimal) -> Result<(), LedgerError> {
    if required > available {
        return Err(LedgerError::InsufficientBalance {
            required,
            available,
        });
    }
    Ok(())
}

/// Adds `amount` to `balance`, rejecting results beyond the `Decimal` range.
fn credit(balance: Decimal, amount: Decimal) -> Result<Decimal, LedgerError> {
    balance.checked_add(amount).ok_or_else(|| {
        LedgerError::InvalidAmount(format!(
            "the balance cannot exceed {}",
            Decimal::MAX
        ))
    })
}

fn into_record(id: ExpenseId, valid: ValidExpense) -> ExpenseRecord {
    ExpenseRecord::new(id, valid.title, valid.price, valid.category, valid.date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::SequentialIds;
    use crate::DraftField;

    fn lunch(price: &str) -> ExpenseDraft {
        ExpenseDraft::new("Lunch", price, "Food", "2024-01-01")
    }

    #[test]
    fn zero_income_is_rejected_without_change() {
        let service = LedgerService::default();
        let state = LedgerState::default();
        let err = service
            .add_income(&state, Decimal::ZERO)
            .expect_err("zero income must fail");
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
        assert_eq!(state, LedgerState::default());
    }

    #[test]
    fn income_past_the_decimal_range_is_rejected() {
        let service = LedgerService::default();
        let state = LedgerState::default();
        let err = service
            .add_income_text(&state, "79228162514264337593543950000")
            .expect_err("overflowing income");
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
        assert_eq!(state, LedgerState::default());

        let near_max = LedgerState::new(Decimal::MAX - Decimal::ONE);
        assert!(service.add_income(&near_max, Decimal::ONE).is_ok());
        assert!(service.add_income(&near_max, Decimal::TWO).is_err());
    }

    #[test]
    fn refunds_that_overflow_leave_state_untouched() {
        let service = LedgerService::default();
        let mut ids = SequentialIds::new();
        let added = service
            .add_expense(&LedgerState::new(Decimal::from(100)), &lunch("100"), &mut ids)
            .unwrap();
        let id = added.state.expenses[0].id;
        let mut full = added.state.clone();
        full.balance = Decimal::MAX - Decimal::from(50);

        let err = service.delete_expense(&full, id).expect_err("refund overflows");
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
        let err = service
            .edit_expense(&full, id, &lunch("1"))
            .expect_err("price cut overflows");
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
        assert_eq!(full.expenses.len(), 1);
        assert_eq!(full.balance, Decimal::MAX - Decimal::from(50));
    }

    #[test]
    fn income_text_must_be_present() {
        let service = LedgerService::default();
        let err = service
            .add_income_text(&LedgerState::default(), "")
            .expect_err("blank income must fail");
        assert_eq!(err, LedgerError::MissingField(DraftField::Amount));
    }

    #[test]
    fn expense_equal_to_balance_empties_the_wallet() {
        let service = LedgerService::default();
        let state = LedgerState::new(Decimal::from(200));
        let mut ids = SequentialIds::new();
        let transition = service
            .add_expense(&state, &lunch("200"), &mut ids)
            .expect("exact balance is affordable");
        assert_eq!(transition.state.balance, Decimal::ZERO);
    }

    #[test]
    fn edit_checks_identity_before_fields() {
        let service = LedgerService::default();
        let state = LedgerState::default();
        let missing = ExpenseId::random();
        let err = service
            .edit_expense(&state, missing, &ExpenseDraft::default())
            .expect_err("unknown id");
        assert_eq!(err, LedgerError::NotFound(missing));
    }

    #[test]
    fn lowering_a_price_is_allowed_on_an_empty_wallet() {
        let service = LedgerService::default();
        let mut ids = SequentialIds::new();
        let added = service
            .add_expense(&LedgerState::new(Decimal::from(50)), &lunch("50"), &mut ids)
            .unwrap();
        let id = added.state.expenses[0].id;
        let edited = service
            .edit_expense(&added.state, id, &lunch("20"))
            .expect("price decrease needs no funds");
        assert_eq!(edited.state.balance, Decimal::from(30));
        assert_eq!(edited.state.expenses[0].id, id);
    }
}
