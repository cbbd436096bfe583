// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI integration tests for configuration validation

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(deprecated)]

mod common;

use assert_cmd::Command;
use common::{write_config, REFERENCE_TASKS};
use predicates::prelude::*;

#[test]
fn valid_config_reports_task_count() {
    let (_temp, path) = write_config(REFERENCE_TASKS);

    Command::cargo_bin("tasklens")
        .unwrap()
        .args(["validate", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout("ok: 4 tasks\n");
}

#[test]
fn missing_schedule_fails_with_suggestion() {
    let (_temp, path) = write_config(
        r#"
[[task]]
name = "purge"
command = "true"
"#,
    );

    Command::cargo_bin("tasklens")
        .unwrap()
        .args(["validate", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("task 'purge' has no schedule"))
        .stderr(predicate::str::contains(
            "Set exactly one of cron, fixed_delay or fixed_rate",
        ));
}

#[test]
fn five_field_cron_is_rejected() {
    let (_temp, path) = write_config(
        r#"
[[task]]
name = "nightly"
cron = "0 0 * * *"
command = "true"
"#,
    );

    Command::cargo_bin("tasklens")
        .unwrap()
        .args(["validate", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("must have 6 fields, found 5"));
}

#[test]
fn missing_file_is_reported() {
    let temp = tempfile::tempdir().unwrap();

    Command::cargo_bin("tasklens")
        .unwrap()
        .args(["validate", "--config"])
        .arg(temp.path().join("nope.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Check the path passed to --config"));
}

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("tasklens")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("validate"));
}
