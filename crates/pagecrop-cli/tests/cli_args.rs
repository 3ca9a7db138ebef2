mod common;

use common::cmd;
use predicates::prelude::*;

#[test]
fn help_flag_prints_usage_with_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("info"))
        .stdout(predicate::str::contains("clusters"))
        .stdout(predicate::str::contains("crop"));
}

#[test]
fn crop_subcommand_help() {
    cmd()
        .args(["crop", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FILE"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--plan"))
        .stdout(predicate::str::contains("--ratio"))
        .stdout(predicate::str::contains("--exclude"))
        .stdout(predicate::str::contains("--split-odd-even").not());
}

#[test]
fn clusters_subcommand_help() {
    cmd()
        .args(["clusters", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--split-odd-even"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn missing_subcommand_fails() {
    cmd().assert().failure();
}

#[test]
fn missing_file_reports_error() {
    cmd()
        .args(["info", "/nonexistent/file.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn crop_without_plan_or_ratio_fails() {
    cmd()
        .args(["crop", "in.pdf", "-o", "out.pdf"])
        .assert()
        .failure();
}
