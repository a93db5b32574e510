//! spendwise-core
//!
//! Business logic for the wallet ledger: validation, the four mutation
//! operations, and derived summaries.
//! Depends on spendwise-domain. No CLI, no terminal I/O, no filesystem access.

pub mod error;
pub mod id;
pub mod ledger_service;
pub mod storage;
pub mod summary_service;
pub mod validation;

pub use error::{DraftField, LedgerError, StoreError};
pub use id::{IdGenerator, RandomIds, SequentialIds};
pub use ledger_service::*;
pub use storage::{KeyValueStore, MemoryStore};
pub use summary_service::*;
pub use validation::*;
