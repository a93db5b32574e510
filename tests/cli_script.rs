use std::path::Path;

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;
use regex::Regex;

fn run_script(home: &Path, script: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("spendwise_cli")
        .expect("binary")
        .env("SPENDWISE_CLI_SCRIPT", "1")
        .env("SPENDWISE_HOME", home)
        .env_remove("RUST_LOG")
        .write_stdin(script.to_string())
        .assert()
}

#[test]
fn script_mode_runs_basic_flow() {
    let home = assert_fs::TempDir::new().expect("temp dir");
    let output = run_script(
        home.path(),
        "income 250\nadd \"Team lunch\" 42.50 Food 2024-03-04\nlist\nexit\n",
    )
    .success()
    .stdout(contains("Income added!"))
    .stdout(contains("Expense saved!"))
    .stdout(contains("Balance: $5207.50"))
    .get_output()
    .stdout
    .clone();

    let stdout = String::from_utf8(output).expect("utf8");
    let row = Regex::new(r"(?m)^[0-9a-f]{8}\s+2024-03-04\s+Team lunch\s+Food\s+\$42\.50$")
        .expect("regex");
    assert!(row.is_match(&stdout), "unexpected listing:\n{stdout}");

    home.child("wallets/default.json").assert(predicate::path::exists());
    home.child("config.json").assert(predicate::path::missing());
}

#[test]
fn state_survives_restart() {
    let home = assert_fs::TempDir::new().expect("temp dir");
    run_script(home.path(), "add Taxi 30 Travel 2024-02-01\n").success();
    run_script(home.path(), "balance\n")
        .success()
        .stdout(contains("Balance: $4970.00"));
}

#[test]
fn rejections_do_not_stop_the_script() {
    let home = assert_fs::TempDir::new().expect("temp dir");
    run_script(
        home.path(),
        "add Yacht 90000 Travel 2024-02-01\nadd Hat 10 Clothing 2024-02-01\nadd \"\" 10 Food 2024-02-01\nbalance\n",
    )
    .success()
    .stderr(contains("Insufficient balance"))
    .stderr(contains("Unknown category: Clothing"))
    .stderr(contains("Missing field: title"))
    .stdout(contains("Balance: $5000.00"));
}

#[test]
fn unknown_commands_get_a_suggestion() {
    let home = assert_fs::TempDir::new().expect("temp dir");
    run_script(home.path(), "balanse\n")
        .success()
        .stderr(contains("Unknown command `balanse`"))
        .stdout(contains("Did you mean `balance`?"));
}

#[test]
fn summary_orders_and_chart_shares() {
    let home = assert_fs::TempDir::new().expect("temp dir");
    let script = "add Pizza 30 Food 2024-01-05\nadd Flight 90 Travel 2024-02-10\nsummary total\nchart\ntrend\n";
    let output = run_script(home.path(), script)
        .success()
        .stdout(contains("25.00%"))
        .stdout(contains("75.00%"))
        .stdout(contains("2024-01"))
        .stdout(contains("2024-02"))
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).expect("utf8");
    let ordered = Regex::new(r"(?s)Spending by category.*Travel.*Food.*Total\s+\$120\.00")
        .expect("regex");
    assert!(ordered.is_match(&stdout), "unexpected summary:\n{stdout}");
}

#[test]
fn corrupt_balance_falls_back_with_warning() {
    let home = assert_fs::TempDir::new().expect("temp dir");
    home.child("wallets/default.json")
        .write_str(r#"{ "balance": "lots", "expenses": "[]" }"#)
        .expect("seed wallet");

    run_script(home.path(), "balance\n")
        .success()
        .stderr(contains("unreadable"))
        .stdout(contains("Balance: $5000.00"));
}

#[test]
fn config_file_changes_categories_and_currency() {
    let home = assert_fs::TempDir::new().expect("temp dir");
    home.child("config.json")
        .write_str(r#"{ "categories": ["Rent", "Food"], "currency_symbol": "EUR " }"#)
        .expect("seed config");

    run_script(home.path(), "categories\nadd Flat 800 rent 2024-04-01\nadd Train 5 Travel 2024-04-02\n")
        .success()
        .stdout(contains("Rent"))
        .stdout(contains("Balance: EUR 4200.00"))
        .stderr(contains("Unknown category: Travel"));
}

#[test]
fn version_prints_build_metadata() {
    let home = assert_fs::TempDir::new().expect("temp dir");
    run_script(home.path(), "version\n")
        .success()
        .stdout(contains(format!("Spendwise {}", env!("CARGO_PKG_VERSION"))))
        .stdout(contains("Build hash"));
}
