// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

pub mod run;
pub mod show;
pub mod validate;

use crate::error::CliError;
use std::path::Path;
use tasklens_core::TasksConfig;

/// Load a task configuration, turning failures into a user-facing error
pub fn load_config(path: &Path) -> Result<TasksConfig, CliError> {
    TasksConfig::load(path).map_err(|e| CliError::config(path, &e))
}
