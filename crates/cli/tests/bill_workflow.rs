use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

fn setup() -> (TempDir, PathBuf) {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("config.toml");
    fs::write(&cfg, format!("version = 1\ndata_dir = '{}'\n", tmp.path().join("data").display()))
        .unwrap();
    (tmp, cfg)
}

fn npbc(cfg: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("npbc"));
    cmd.arg("--config").arg(cfg);
    cmd
}

fn add_times(cfg: &Path) {
    npbc(cfg)
        .args(["addpaper", "-k", "times", "-n", "The Times", "-d", "YYYYYYN", "-p", "2;2;2;2;2;2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK   npbc addpaper"));
}

#[test]
fn calculate_excludes_stored_undelivered_dates() {
    let (_tmp, cfg) = setup();
    add_times(&cfg);

    npbc(&cfg)
        .args(["addudl", "-m", "1", "-y", "2024", "-k", "times", "-s", "mondays"])
        .assert()
        .success();

    npbc(&cfg)
        .args(["calculate", "-m", "1", "-y", "2024", "--no-log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("For January 2024"))
        .stdout(predicate::str::contains("TOTAL: 44.00"))
        .stdout(predicate::str::contains("The Times: 44.00"))
        .stdout(predicate::str::contains("Saved results").not());
}

#[test]
fn all_papers_string_applies_to_every_paper() {
    let (_tmp, cfg) = setup();
    add_times(&cfg);
    npbc(&cfg)
        .args(["addpaper", "-k", "hindu", "-n", "The Hindu", "-d", "NNNNNNY", "-p", "5"])
        .assert()
        .success();

    // January 2024 has four Sundays; the 7th is one of them.
    npbc(&cfg)
        .args(["addudl", "-m", "1", "-y", "2024", "-k", "all", "-s", "1-7"])
        .assert()
        .success();

    npbc(&cfg)
        .args(["calculate", "-m", "1", "-y", "2024", "--no-log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The Times: 42.00"))
        .stdout(predicate::str::contains("The Hindu: 15.00"))
        .stdout(predicate::str::contains("TOTAL: 57.00"));
}

#[test]
fn calculate_records_results_for_history() {
    let (_tmp, cfg) = setup();
    add_times(&cfg);

    npbc(&cfg)
        .args(["calculate", "-m", "2", "-y", "2024", "-u", "times:1-3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved results to logs."));

    let out = npbc(&cfg)
        .args(["history", "-m", "2", "-y", "2024", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let records: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().any(|r| r["name"] == "TOTAL" && r.get("key").is_none()));
    assert!(records.iter().any(|r| r["key"] == "times"));
}

#[test]
fn calculate_json_lists_undelivered_dates() {
    let (_tmp, cfg) = setup();
    add_times(&cfg);

    let out = npbc(&cfg)
        .args(["calculate", "-m", "1", "-y", "2024", "-u", "times:2", "--no-log", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let bill: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(bill["month"], 1);
    assert_eq!(bill["year"], 2024);
    assert_eq!(bill["total"], 52.0);
    assert_eq!(bill["papers"][0]["undelivered"][0], "2024-01-02");
}

#[test]
fn addudl_rejects_invalid_string_and_unknown_paper() {
    let (_tmp, cfg) = setup();
    add_times(&cfg);

    npbc(&cfg)
        .args(["addudl", "-m", "1", "-y", "2024", "-k", "times", "-s", "5-"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("FAIL npbc addudl"));

    npbc(&cfg)
        .args(["addudl", "-m", "1", "-y", "2024", "-k", "nope", "-s", "5"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Paper not found: nope"));
}

#[test]
fn deludl_clears_the_period() {
    let (_tmp, cfg) = setup();
    add_times(&cfg);

    npbc(&cfg)
        .args(["addudl", "-m", "1", "-y", "2024", "-k", "times", "-s", "mondays"])
        .assert()
        .success();
    npbc(&cfg)
        .args(["deludl", "-m", "1", "-y", "2024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 1 strings in January 2024"));

    npbc(&cfg)
        .args(["calculate", "-m", "1", "-y", "2024", "--no-log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("TOTAL: 54.00"));
}

#[test]
fn calculate_rejects_invalid_month() {
    let (_tmp, cfg) = setup();

    npbc(&cfg)
        .args(["calculate", "-m", "13", "-y", "2024"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("month 13 is out of range"));
}
