use rust_decimal::Decimal;
use spendwise_config::Config;
use spendwise_core::{
    IdGenerator, KeyValueStore, LedgerError, LedgerService, LedgerTransition, RandomIds,
    SummaryService,
};
use spendwise_domain::{
    CategoryShare, CategoryTotal, ExpenseDraft, ExpenseId, ExpenseRecord, LedgerEvent,
    LedgerState, MonthlyTotal,
};
use spendwise_storage_json::{load_state, save_state};
use tracing::{info, warn};

/// Result of a committed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub event: LedgerEvent,
    /// False when the new state could not be written to storage.
    pub persisted: bool,
}

/// Result of looking an expense up by a leading fragment of its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixMatch<'a> {
    None,
    Unique(&'a ExpenseRecord),
    Ambiguous(usize),
}

/// Facade that owns the current wallet and writes it back after every change.
///
/// The in-memory state is authoritative. A failed write is logged and
/// reported through [`Outcome::persisted`]; it is not retried.
pub struct WalletManager {
    state: LedgerState,
    service: LedgerService,
    store: Box<dyn KeyValueStore>,
    ids: Box<dyn IdGenerator>,
    load_warnings: Vec<String>,
}

impl WalletManager {
    /// Loads the wallet from `store`, falling back to `default_balance` and
    /// an empty expense list for keys that are missing or unreadable.
    pub fn open(
        store: Box<dyn KeyValueStore>,
        mut ids: Box<dyn IdGenerator>,
        service: LedgerService,
        default_balance: Decimal,
    ) -> Self {
        let report = load_state(store.as_ref(), default_balance, ids.as_mut());
        Self {
            state: report.state,
            service,
            store,
            ids,
            load_warnings: report.warnings,
        }
    }

    pub fn from_config(config: &Config, store: Box<dyn KeyValueStore>) -> Self {
        Self::open(
            store,
            Box::new(RandomIds),
            LedgerService::new(config.catalog()),
            config.starting_balance,
        )
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn balance(&self) -> Decimal {
        self.state.balance
    }

    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.state.expenses
    }

    pub fn service(&self) -> &LedgerService {
        &self.service
    }

    pub fn load_warnings(&self) -> &[String] {
        &self.load_warnings
    }

    pub fn add_income(&mut self, amount: &str) -> Result<Outcome, LedgerError> {
        let transition = self.service.add_income_text(&self.state, amount)?;
        Ok(self.commit(transition))
    }

    pub fn add_expense(&mut self, draft: &ExpenseDraft) -> Result<Outcome, LedgerError> {
        let transition = self
            .service
            .add_expense(&self.state, draft, self.ids.as_mut())?;
        Ok(self.commit(transition))
    }

    pub fn edit_expense(
        &mut self,
        id: ExpenseId,
        draft: &ExpenseDraft,
    ) -> Result<Outcome, LedgerError> {
        let transition = self.service.edit_expense(&self.state, id, draft)?;
        Ok(self.commit(transition))
    }

    pub fn delete_expense(&mut self, id: ExpenseId) -> Result<Outcome, LedgerError> {
        let transition = self.service.delete_expense(&self.state, id)?;
        Ok(self.commit(transition))
    }

    /// Finds the expense whose id starts with `prefix` (hex, hyphens ignored).
    pub fn find_by_prefix(&self, prefix: &str) -> PrefixMatch<'_> {
        let mut matches = self
            .state
            .expenses
            .iter()
            .filter(|record| record.id.matches_prefix(prefix));
        match (matches.next(), matches.count()) {
            (None, _) => PrefixMatch::None,
            (Some(record), 0) => PrefixMatch::Unique(record),
            (Some(_), rest) => PrefixMatch::Ambiguous(rest + 1),
        }
    }

    pub fn category_totals(&self) -> Vec<CategoryTotal> {
        SummaryService::summarize_by_category(&self.state)
    }

    pub fn category_shares(&self, precision: u32) -> Vec<CategoryShare> {
        SummaryService::category_shares(&self.state, precision)
    }

    pub fn monthly_trend(&self) -> Vec<MonthlyTotal> {
        SummaryService::summarize_by_month(&self.state)
    }

    fn commit(&mut self, transition: LedgerTransition) -> Outcome {
        self.state = transition.state;
        let kind = transition.event.kind();
        let persisted = match save_state(self.store.as_ref(), &self.state) {
            Ok(()) => {
                info!(event = %kind, balance = %self.state.balance, "wallet saved");
                true
            }
            Err(err) => {
                warn!(event = %kind, error = %err, "wallet not saved; keeping in-memory state");
                false
            }
        };
        Outcome {
            event: transition.event,
            persisted,
        }
    }
}
