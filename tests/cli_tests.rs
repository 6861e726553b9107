//! Command-line tests
//!
//! Drive the `findash-import` binary the way a user would: fixture files or
//! stdin in, reports on stdout, logs and fatal errors on stderr.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const TODAY: &str = "2025-10-01";

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("findash-import").expect("Binary not built");
    cmd.env_remove("RUST_LOG").args(["--today", TODAY]);
    cmd
}

#[test]
fn test_csv_report_for_file() {
    let expected = fs::read_to_string("tests/fixtures/happy_path/expected.csv").unwrap();

    cli()
        .arg("tests/fixtures/happy_path/input.txt")
        .assert()
        .success()
        .stdout(predicate::str::diff(expected));
}

#[test]
fn test_reads_stdin_without_inputs() {
    cli()
        .args(["--strategy", "sync"])
        .write_stdin("24/09/2025 - UBER TRIP - R$ 12,00\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<stdin>,1,2025-09-24,UBER TRIP,12.00,Transporte,EXPENSE,",
        ));
}

#[test]
fn test_json_report() {
    let output = cli()
        .args(["--format", "json", "-"])
        .write_stdin("25/09/2025 - IFOOD*RESTAURANTE BOM PRATO - R$ 55,40\nlixo\n")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let transaction = &report["sources"][0]["transactions"][0];
    assert_eq!(transaction["title"], "IFOOD*RESTAURANTE BOM PRATO");
    assert_eq!(transaction["amount"], 55.4);
    assert_eq!(transaction["type"], "EXPENSE");
    assert_eq!(transaction["date"], "2025-09-25T00:00:00.000Z");
    assert_eq!(report["sources"][0]["errors"][0]["reason"], "MalformedFormat");
}

#[test]
fn test_summary_report() {
    cli()
        .args(["--format", "summary", "tests/fixtures/duplicates/input.txt"])
        .assert()
        .success()
        .stdout("category,total\nTransporte,63.00\nincome,0.00\nexpense,63.00\nbalance,-63.00\n");
}

#[test]
fn test_rejected_lines_are_not_fatal_and_go_to_errors_file() {
    let dir = TempDir::new().unwrap();
    let errors_path = dir.path().join("erros.csv");

    cli()
        .arg("--errors")
        .arg(&errors_path)
        .arg("tests/fixtures/malformed_lines/input.txt")
        .assert()
        .success();

    let expected = fs::read_to_string("tests/fixtures/malformed_lines/expected_errors.csv").unwrap();
    assert_eq!(fs::read_to_string(&errors_path).unwrap(), expected);
}

#[test]
fn test_custom_rules_file() {
    cli()
        .args([
            "--rules",
            "tests/fixtures/custom_rules/rules.csv",
            "tests/fixtures/custom_rules/input.txt",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("PIX RECEBIDO MARIA,100.00,Transferências,INCOME"));
}

#[test]
fn test_invalid_rules_file_fails() {
    let mut rules = NamedTempFile::new().unwrap();
    rules
        .write_all(b"pattern,category,match\nuber(,Transporte,regex\n")
        .unwrap();

    cli()
        .arg("--rules")
        .arg(rules.path())
        .arg("tests/fixtures/happy_path/input.txt")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid rule 'uber('"));
}

#[test]
fn test_missing_input_fails() {
    cli()
        .arg("nonexistent.txt")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("File not found: nonexistent.txt"));
}

#[test]
fn test_blank_stdin_is_nothing_to_import() {
    cli()
        .write_stdin("\n   \n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Nothing to import in <stdin>"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    cli()
        .args(["-vv", "tests/fixtures/malformed_lines/input.txt"])
        .assert()
        .success()
        .stderr(predicate::str::contains("imported 2 of 10 lines"))
        .stderr(predicate::str::contains("Skipping line 3: InvalidDate"));
}

#[test]
fn test_quiet_by_default() {
    cli()
        .arg("tests/fixtures/malformed_lines/input.txt")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
