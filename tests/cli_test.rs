use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

#[test]
fn test_cli_discount() {
    let mut cmd = Command::new(cargo_bin!("checkout-kit"));
    cmd.args(["discount", "--price", "200", "--percentage", "25"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("discount: 50"))
        .stdout(predicate::str::contains("final price: 150"));
}

#[test]
fn test_cli_discount_on_very_large_price() {
    let mut cmd = Command::new(cargo_bin!("checkout-kit"));
    cmd.args([
        "discount",
        "--price",
        "1000000000000000000000000000",
        "--percentage",
        "100",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("discount: 1000000000000000000000000000"))
        .stdout(predicate::str::contains("final price: 0"));
}

#[test]
fn test_cli_discount_rejects_out_of_range_percentage() {
    let mut cmd = Command::new(cargo_bin!("checkout-kit"));
    cmd.args(["discount", "--price", "100", "--percentage", "-5"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Percentage must be between 0 and 100"));
}

#[test]
fn test_cli_user_lookup_from_csv() {
    let mut cmd = Command::new(cargo_bin!("checkout-kit"));
    cmd.args(["user", "2", "--users-csv", "tests/fixtures/users.csv"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"id\":2"))
        .stdout(predicate::str::contains("\"name\":\"Grace Hopper\""))
        // The fixture carries one row with a non-numeric id
        .stderr(predicate::str::contains("Error reading user row"));
}

#[test]
fn test_cli_user_not_found() {
    let mut cmd = Command::new(cargo_bin!("checkout-kit"));
    cmd.args(["user", "99", "--users-csv", "tests/fixtures/users.csv"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("not found"));
}

#[test]
fn test_cli_user_rejects_injection() {
    let mut cmd = Command::new(cargo_bin!("checkout-kit"));
    cmd.args([
        "user",
        "1; DROP TABLE users",
        "--users-csv",
        "tests/fixtures/users.csv",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn test_cli_charge_approved() {
    let mut cmd = Command::new(cargo_bin!("checkout-kit"));
    cmd.args([
        "charge",
        "--amount",
        "10.00",
        "--card",
        "4242 4242 4242 4242",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"outcome\":\"approved\""))
        .stdout(predicate::str::contains("\"card\":\"****4242\""))
        .stdout(predicate::str::contains("4242424242424242").not());
}

#[test]
fn test_cli_charge_declined() {
    let mut cmd = Command::new(cargo_bin!("checkout-kit"));
    cmd.args(["charge", "--amount", "10.00", "--card", "4000000000000002"]);

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("\"outcome\":\"declined\""))
        .stderr(predicate::str::contains("card_declined"));
}

#[test]
fn test_cli_charge_invalid_card() {
    let mut cmd = Command::new(cargo_bin!("checkout-kit"));
    cmd.args(["charge", "--amount", "10.00", "--card", "4242424242424241"]);

    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Card number fails checksum"));
}

#[test]
fn test_cli_config_file_sets_currency() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "[payment]").unwrap();
    writeln!(config, "currency = \"EUR\"").unwrap();

    let mut cmd = Command::new(cargo_bin!("checkout-kit"));
    cmd.arg("--config")
        .arg(config.path())
        .args(["charge", "--amount", "3.50", "--card", "4242424242424242"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"currency\":\"EUR\""));
}

#[test]
fn test_cli_invalid_config_file() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "[payment]").unwrap();
    writeln!(config, "timeout_ms = 0").unwrap();

    let mut cmd = Command::new(cargo_bin!("checkout-kit"));
    cmd.arg("--config")
        .arg(config.path())
        .args(["discount", "--price", "1", "--percentage", "1"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("timeout_ms"));
}
