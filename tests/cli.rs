use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

fn wallet(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("wallet").unwrap();
    cmd.env("WALLET_CLI_CONFIG_DIR", temp_dir.path().join("config"))
        .env_remove("WALLET_FILE")
        .arg("--file")
        .arg(temp_dir.path().join("wallet.json"));
    cmd
}

fn add(temp_dir: &TempDir, date: &str, category: &str, amount: &str, description: &str) {
    wallet(temp_dir)
        .args(["add", "--date", date, "--category", category, "--amount", amount])
        .args(["--description", description])
        .assert()
        .success()
        .stdout(contains("Added entry"));
}

#[test]
fn add_then_balance() {
    let tmp = TempDir::new().unwrap();
    add(&tmp, "2024-01-01", "income", "1000", "Salary");
    add(&tmp, "2024-01-02", "2", "120.25", "Groceries");

    wallet(&tmp)
        .arg("balance")
        .assert()
        .success()
        .stdout(contains("Total income: 1000.00"))
        .stdout(contains("Total spending: 120.25"))
        .stdout(contains("Balance: 879.75"));

    let json = std::fs::read_to_string(tmp.path().join("wallet.json")).unwrap();
    assert!(json.contains("\"entries\""));
    assert!(json.contains("\"Groceries\""));
}

#[test]
fn list_and_find() {
    let tmp = TempDir::new().unwrap();
    add(&tmp, "2024-01-01", "income", "123.45", "Bonus");
    add(&tmp, "2024-01-02", "spend", "123.46", "Shoes");

    wallet(&tmp)
        .args(["list", "--limit", "1"])
        .assert()
        .success()
        .stdout(contains("Bonus"))
        .stdout(contains("Showing 1 of 2 entries"));

    wallet(&tmp)
        .args(["find", "amount", "123.45"])
        .assert()
        .success()
        .stdout(contains("Bonus"))
        .stdout(contains("Shoes").not());

    wallet(&tmp)
        .args(["find", "date", "2023-12-31"])
        .assert()
        .success()
        .stdout(contains("No matching entries found."));
}

#[test]
fn unknown_category_in_file_fails() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("wallet.json"),
        r#"{"entries": [{"date": "2024-01-01", "category": 3, "amount": 5, "description": ""}]}"#,
    )
    .unwrap();

    wallet(&tmp).arg("balance").assert().failure();
}

#[test]
fn shell_session_from_stdin() {
    let tmp = TempDir::new().unwrap();
    add(&tmp, "2024-01-01", "income", "50", "Gift");

    wallet(&tmp)
        .write_stdin("1\n2\n2024-01-03\n2\n20\nBooks\n1\n6\nq\n")
        .assert()
        .success()
        .stdout(contains("Wallet loaded."))
        .stdout(contains("Balance: 30.00"))
        .stdout(contains("Wallet saved to"));

    let json = std::fs::read_to_string(tmp.path().join("wallet.json")).unwrap();
    assert!(json.contains("\"Books\""));
}

#[test]
fn config_shows_paths() {
    let tmp = TempDir::new().unwrap();
    wallet(&tmp)
        .arg("config")
        .assert()
        .success()
        .stdout(contains("Wallet file:"))
        .stdout(contains("Page size:       5"));
}
