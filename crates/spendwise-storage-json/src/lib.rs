//! spendwise-storage-json
//!
//! JSON persistence for wallets: the two-key state layout codec and a
//! filesystem key-value store with one file per wallet profile.

pub mod codec;
pub mod file_store;

pub use codec::{decode_expenses, encode_expenses, load_state, save_state, LoadReport};
pub use file_store::{JsonFileStore, StoragePaths};
