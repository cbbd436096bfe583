// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// The four tasks of the reference scheduling setup; the custom slot is a failing command
pub const REFERENCE_TASKS: &str = r#"
[[task]]
name = "com.example.Processor.processOrders"
cron = "0 0 0/3 1/1 * ?"
command = "true"

[[task]]
name = "com.example.Processor.purge"
fixed_delay = "5s"
initial_delay = "0s"
command = "true"

[[task]]
name = "com.example.Processor.retrieveIssues"
fixed_rate = "3s"
initial_delay = "10s"
command = "true"

[[task]]
name = "com.example.Processor.failing"
fixed_delay = "1h"
command = "echo 'Failed while running custom task' >&2; exit 1"
"#;

/// Write `content` as tasks.toml in a fresh temp dir.
pub fn write_config(content: &str) -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let path = temp.path().join("tasks.toml");
    fs::write(&path, content).expect("Failed to write config");
    (temp, path)
}
