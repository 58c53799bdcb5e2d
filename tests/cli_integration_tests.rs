//! CLI Integration Tests
//!
//! Tests the CLI binary directly using assert_cmd to exercise main.rs code paths.
//!
//! # Coverage Exclusion
//! These tests are skipped during coverage runs.

#![cfg(not(coverage))]
#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HISTORY_LINE: &str = "2024-01-10 EUR 45,12340000 USD 41,98760000";

fn bcv() -> Command {
    let mut cmd = Command::cargo_bin("bcv-rates").unwrap();
    cmd.env_remove("BCV_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn home_page(date: &str, eur: &str, usd: &str) -> String {
    format!(
        r#"<html><body>
        <div id="euro"><strong> {eur} </strong></div>
        <div id="dolar"><strong> {usd} </strong></div>
        <span class="date-display-single" content="{date}T00:00:00-04:00">hoy</span>
        </body></html>"#
    )
}

fn write_quarter(path: &Path, dates: &[&str]) {
    let mut workbook = Workbook::new();
    for (i, date) in dates.iter().enumerate() {
        let worksheet = workbook.add_worksheet();
        worksheet
            .write_string(2, 3, format!("Fecha Valor: {}", date))
            .unwrap();
        worksheet.write_string(5, 1, "EUR").unwrap();
        worksheet.write_number(5, 6, 39.5 + i as f64).unwrap();
        worksheet.write_string(6, 1, "USD").unwrap();
        worksheet.write_number(6, 6, 36.25).unwrap();
    }
    workbook.save(path).unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND VERSION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    bcv()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("bcv-rates"))
        .stdout(predicate::str::contains("COMMANDS"));
}

#[test]
fn test_cli_version() {
    bcv()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bcv-rates"));
}

#[test]
fn test_fetch_help_warns_about_insecure() {
    bcv()
        .args(["fetch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--insecure"))
        .stdout(predicate::str::contains("WARNING"));
}

#[test]
fn test_missing_subcommand_fails() {
    bcv().assert().failure();
}

// ═══════════════════════════════════════════════════════════════════════════
// BATCH COMMAND
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_batch_writes_sorted_ledger() {
    let dir = TempDir::new().unwrap();
    let xls_dir = dir.path().join("xls_files");
    fs::create_dir(&xls_dir).unwrap();
    write_quarter(&xls_dir.join("24a.xlsx"), &["11/01/2024", "05/01/2024"]);
    let output = dir.path().join("excel.txt");

    bcv()
        .arg("batch")
        .arg("--dir")
        .arg(&xls_dir)
        .arg("--output")
        .arg(&output)
        .arg("--no-rename")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 records"));

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "2024-01-05 EUR 40,50000000 USD 36,25000000\n\
         2024-01-11 EUR 39,50000000 USD 36,25000000\n"
    );
}

#[test]
fn test_batch_strict_fails_on_bad_workbook() {
    let dir = TempDir::new().unwrap();
    let xls_dir = dir.path().join("xls_files");
    fs::create_dir(&xls_dir).unwrap();
    fs::write(xls_dir.join("24a.xls"), b"garbage").unwrap();

    bcv()
        .arg("batch")
        .arg("--dir")
        .arg(&xls_dir)
        .arg("--output")
        .arg(dir.path().join("excel.txt"))
        .arg("--no-rename")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Workbook error"));
}

#[test]
fn test_batch_reads_config_file() {
    let dir = TempDir::new().unwrap();
    let xls_dir = dir.path().join("xls_files");
    fs::create_dir(&xls_dir).unwrap();
    write_quarter(&xls_dir.join("24a.xlsx"), &["11/01/2024"]);

    let config = dir.path().join("bcv.yaml");
    fs::write(
        &config,
        format!(
            "xls_dir: {}\noutput_dir: {}\nrename_files: false\n",
            xls_dir.display(),
            dir.path().join("out").display()
        ),
    )
    .unwrap();

    bcv().arg("--config").arg(&config).arg("batch").assert().success();

    assert_eq!(
        fs::read_to_string(dir.path().join("out").join("excel.txt")).unwrap(),
        "2024-01-11 EUR 39,50000000 USD 36,25000000\n"
    );
}

#[test]
fn test_bad_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bcv.yaml");
    fs::write(&config, "rename_files: [not, a, bool]\n").unwrap();

    bcv()
        .arg("--config")
        .arg(&config)
        .arg("batch")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load config"));
}

// ═══════════════════════════════════════════════════════════════════════════
// STAGE COMMAND
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_stage_renames_upstream_files() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("2_1_2c24_smc.xls"), b"").unwrap();

    bcv()
        .arg("stage")
        .arg("--dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("24c.xls"));

    assert!(dir.path().join("24c.xls").exists());
    assert!(!dir.path().join("2_1_2c24_smc.xls").exists());
}

// ═══════════════════════════════════════════════════════════════════════════
// FETCH COMMAND
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_fetch_appends_new_quotation() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .body(home_page("2024-01-11", "45.5000", "42.1000"));
    });

    let dir = TempDir::new().unwrap();
    let history = dir.path().join("history.txt");
    let log = dir.path().join("log.txt");
    fs::write(&history, format!("{}\n", HISTORY_LINE)).unwrap();

    bcv()
        .arg("fetch")
        .arg("cron")
        .arg("--history")
        .arg(&history)
        .arg("--log")
        .arg(&log)
        .arg("--url")
        .arg(server.url("/"))
        .arg("--no-notify")
        .assert()
        .success()
        .stdout(predicate::str::contains("New quotation"));

    assert_eq!(
        fs::read_to_string(&history).unwrap(),
        format!(
            "{}\n2024-01-11 EUR 45,50000000 USD 42,10000000\n",
            HISTORY_LINE
        )
    );
    let log_content = fs::read_to_string(&log).unwrap();
    assert_eq!(log_content.lines().count(), 1);
    assert!(log_content.trim_end().ends_with(" cron"));
}

#[test]
fn test_fetch_twice_is_idempotent() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .body(home_page("2024-01-10", "45,12340000", "41,98760000"));
    });

    let dir = TempDir::new().unwrap();
    let history = dir.path().join("history.txt");
    let log = dir.path().join("log.txt");
    fs::write(&history, format!("{}\n", HISTORY_LINE)).unwrap();

    for _ in 0..2 {
        bcv()
            .arg("fetch")
            .arg("--history")
            .arg(&history)
            .arg("--log")
            .arg(&log)
            .arg("--url")
            .arg(server.url("/"))
            .arg("--no-notify")
            .assert()
            .success()
            .stdout(predicate::str::contains("No new quotation"));
    }

    assert_eq!(
        fs::read_to_string(&history).unwrap(),
        format!("{}\n", HISTORY_LINE)
    );
    assert!(!log.exists());
}

#[test]
fn test_fetch_unreachable_source_succeeds_quietly() {
    let dir = TempDir::new().unwrap();
    let history = dir.path().join("history.txt");

    bcv()
        .arg("fetch")
        .arg("--history")
        .arg(&history)
        .arg("--log")
        .arg(dir.path().join("log.txt"))
        .arg("--url")
        .arg("http://127.0.0.1:9/")
        .arg("--no-notify")
        .assert()
        .success()
        .stdout(predicate::str::contains("Source unavailable"));

    assert_eq!(fs::read_to_string(&history).unwrap(), "");
}

#[test]
fn test_fetch_broken_markup_fails() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200).body("<html><body>redesigned</body></html>");
    });

    let dir = TempDir::new().unwrap();

    bcv()
        .arg("fetch")
        .arg("--history")
        .arg(dir.path().join("history.txt"))
        .arg("--log")
        .arg(dir.path().join("log.txt"))
        .arg("--url")
        .arg(server.url("/"))
        .arg("--no-notify")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Markup error"));
}
