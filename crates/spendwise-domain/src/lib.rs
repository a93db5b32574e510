//! spendwise-domain
//!
//! Pure domain models (LedgerState, ExpenseRecord, Category, events, summary rows).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod category;
pub mod common;
pub mod expense;
pub mod ledger;

pub use category::*;
pub use common::*;
pub use expense::*;
pub use ledger::*;
