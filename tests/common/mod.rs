#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use once_cell::sync::Lazy;
use spendwise::WalletManager;
use spendwise_core::{LedgerService, SequentialIds};
use spendwise_domain::DEFAULT_STARTING_BALANCE;
use spendwise_storage_json::{JsonFileStore, StoragePaths};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh directory usable as `SPENDWISE_HOME`.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn wallet_store(home: &PathBuf) -> JsonFileStore {
    JsonFileStore::for_profile(&StoragePaths::under(home), "default").expect("wallet store")
}

/// Opens the default profile under `home` with deterministic ids.
pub fn open_wallet(home: &PathBuf) -> WalletManager {
    WalletManager::open(
        Box::new(wallet_store(home)),
        Box::new(SequentialIds::new()),
        LedgerService::default(),
        DEFAULT_STARTING_BALANCE,
    )
}
