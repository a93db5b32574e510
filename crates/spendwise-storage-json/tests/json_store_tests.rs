use std::fs;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use spendwise_core::{KeyValueStore, LedgerService, SequentialIds, StoreError};
use spendwise_domain::{ExpenseDraft, LedgerState};
use spendwise_storage_json::{load_state, save_state, JsonFileStore, StoragePaths};
use tempfile::tempdir;

#[test]
fn json_store_persists_keys_across_instances() {
    let dir = tempdir().expect("tempdir");
    let paths = StoragePaths::under(dir.path());

    let store = JsonFileStore::for_profile(&paths, "Household").expect("open store");
    store.set("balance", "42.10").expect("write balance");

    let reopened = JsonFileStore::for_profile(&paths, "household").expect("reopen store");
    assert_eq!(
        reopened.get("balance").expect("read balance").as_deref(),
        Some("42.10")
    );
    assert_eq!(reopened.get("expenses").expect("read expenses"), None);
    assert!(reopened.path().ends_with("wallets/household.json"));
    assert!(!reopened.path().with_extension("json.tmp").exists());
}

#[test]
fn wallet_state_round_trips_through_disk() {
    let dir = tempdir().expect("tempdir");
    let paths = StoragePaths::under(dir.path());
    let store = JsonFileStore::for_profile(&paths, "default").expect("open store");

    let service = LedgerService::default();
    let mut ids = SequentialIds::new();
    let mut state = LedgerState::default();
    for (title, price, category, date) in [
        ("Lunch", "200", "Food", "2024-01-01"),
        ("Bus", "2.75", "Travel", "2024-01-03"),
        ("Shoes", "89.99", "Shopping", "2024-02-11"),
    ] {
        state = service
            .add_expense(
                &state,
                &ExpenseDraft::new(title, price, category, date),
                &mut ids,
            )
            .expect("add expense")
            .state;
    }
    save_state(&store, &state).expect("save state");

    let report = load_state(&store, Decimal::from(5000), &mut SequentialIds::starting_at(99));
    assert_eq!(report.state, state);
    assert_eq!(
        report.state.expenses[2].date,
        NaiveDate::from_ymd_opt(2024, 2, 11).unwrap()
    );
    assert!(report.warnings.is_empty());
}

#[test]
fn corrupt_wallet_file_loads_defaults_and_is_repaired_on_save() {
    let dir = tempdir().expect("tempdir");
    let paths = StoragePaths::under(dir.path());
    let store = JsonFileStore::for_profile(&paths, "broken").expect("open store");
    fs::write(store.path(), "not json at all").expect("write garbage");

    let report = load_state(&store, Decimal::from(5000), &mut SequentialIds::new());
    assert_eq!(report.state, LedgerState::default());
    assert!(!report.warnings.is_empty());

    save_state(&store, &report.state).expect("save over garbage");
    let again = load_state(&store, Decimal::from(1), &mut SequentialIds::new());
    assert_eq!(again.state.balance, Decimal::from(5000));
    assert!(again.warnings.is_empty());
}

#[test]
fn profiles_are_listed_by_canonical_name() {
    let dir = tempdir().expect("tempdir");
    let paths = StoragePaths::under(dir.path());
    for name in ["Travel Fund", "default"] {
        JsonFileStore::for_profile(&paths, name)
            .expect("open store")
            .set("balance", "1")
            .expect("write");
    }
    let profiles = JsonFileStore::list_profiles(&paths).expect("list profiles");
    assert_eq!(profiles, vec!["default", "travel_fund"]);
}

#[test]
fn batched_write_lands_whole_or_not_at_all() {
    let dir = tempdir().expect("tempdir");
    let paths = StoragePaths::under(dir.path());
    let store = JsonFileStore::for_profile(&paths, "default").expect("open store");
    store
        .set_many(&[("expenses", "[]"), ("balance", "5000")])
        .expect("first batch");
    let before = fs::read(store.path()).expect("read wallet");

    // A directory squatting on the temporary path makes the next write fail.
    let tmp = store.path().with_extension("json.tmp");
    fs::create_dir(&tmp).expect("block tmp path");
    let result = store.set_many(&[("expenses", "[{}]"), ("balance", "4800")]);
    assert!(result.is_err());
    assert_eq!(fs::read(store.path()).expect("read wallet"), before);
    assert_eq!(store.get("balance").expect("read").as_deref(), Some("5000"));
    assert_eq!(store.get("expenses").expect("read").as_deref(), Some("[]"));
}

#[test]
fn unreadable_wallet_file_is_not_overwritten() {
    let dir = tempdir().expect("tempdir");
    let paths = StoragePaths::under(dir.path());
    let store = JsonFileStore::for_profile(&paths, "default").expect("open store");
    let bytes = [0xff, 0xfe, 0x7b, 0x00, 0x80];
    fs::write(store.path(), bytes).expect("write bytes");

    let err = store.set("balance", "1").expect_err("invalid UTF-8 is an I/O failure");
    assert!(matches!(err, StoreError::Io(_)), "{err:?}");
    assert_eq!(fs::read(store.path()).expect("read wallet"), bytes);

    let report = load_state(&store, Decimal::from(5000), &mut SequentialIds::new());
    assert_eq!(report.state, LedgerState::default());
    assert!(report.warnings.iter().any(|w| w.contains("could not read")));
}
