// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task configuration files
//!
//! ```toml
//! [[task]]
//! name = "purge"
//! fixed_delay = "5s"
//! initial_delay = "0s"
//! command = "rm -rf /tmp/cache/*"
//! ```
//!
//! Each task names exactly one of `cron`, `fixed_delay` or `fixed_rate`.

use crate::cron::{CronError, CronExpression};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors loading or validating a task configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("task '{0}' has no schedule (set one of cron, fixed_delay, fixed_rate)")]
    MissingSchedule(String),
    #[error("task '{0}' has more than one schedule")]
    AmbiguousSchedule(String),
    #[error("task '{0}' has a zero interval")]
    ZeroInterval(String),
    #[error("task '{0}' sets initial_delay, which only applies to fixed_delay and fixed_rate")]
    UnexpectedInitialDelay(String),
    #[error("task '{0}' has an empty command")]
    EmptyCommand(String),
    #[error("task name '{0}' is used more than once")]
    DuplicateName(String),
    #[error("task '{task}': {source}")]
    Cron {
        task: String,
        #[source]
        source: CronError,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default, rename = "task")]
    tasks: Vec<RawTask>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTask {
    name: String,
    command: String,
    #[serde(default)]
    cron: Option<String>,
    #[serde(default, with = "humantime_serde")]
    fixed_delay: Option<Duration>,
    #[serde(default, with = "humantime_serde")]
    fixed_rate: Option<Duration>,
    #[serde(default, with = "humantime_serde")]
    initial_delay: Option<Duration>,
}

/// Validated schedule of a configured task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleSpec {
    Cron(CronExpression),
    FixedDelay {
        interval: Duration,
        initial_delay: Duration,
    },
    FixedRate {
        interval: Duration,
        initial_delay: Duration,
    },
}

/// A validated task definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpec {
    pub name: String,
    pub command: String,
    pub schedule: ScheduleSpec,
}

/// Validated set of task definitions, in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TasksConfig {
    pub tasks: Vec<TaskSpec>,
}

impl TasksConfig {
    /// Read and validate a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse and validate configuration text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;

        let mut seen = HashSet::new();
        let mut tasks = Vec::with_capacity(raw.tasks.len());
        for task in raw.tasks {
            if !seen.insert(task.name.clone()) {
                return Err(ConfigError::DuplicateName(task.name));
            }
            tasks.push(validate(task)?);
        }
        Ok(Self { tasks })
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

fn validate(task: RawTask) -> Result<TaskSpec, ConfigError> {
    if task.command.trim().is_empty() {
        return Err(ConfigError::EmptyCommand(task.name));
    }

    let schedule = match (task.cron, task.fixed_delay, task.fixed_rate) {
        (None, None, None) => return Err(ConfigError::MissingSchedule(task.name)),
        (Some(expression), None, None) => {
            if task.initial_delay.is_some() {
                return Err(ConfigError::UnexpectedInitialDelay(task.name));
            }
            let expression = CronExpression::parse(&expression).map_err(|source| {
                ConfigError::Cron {
                    task: task.name.clone(),
                    source,
                }
            })?;
            ScheduleSpec::Cron(expression)
        }
        (None, Some(interval), None) => {
            if interval.is_zero() {
                return Err(ConfigError::ZeroInterval(task.name));
            }
            ScheduleSpec::FixedDelay {
                interval,
                initial_delay: task.initial_delay.unwrap_or_default(),
            }
        }
        (None, None, Some(interval)) => {
            if interval.is_zero() {
                return Err(ConfigError::ZeroInterval(task.name));
            }
            ScheduleSpec::FixedRate {
                interval,
                initial_delay: task.initial_delay.unwrap_or_default(),
            }
        }
        _ => return Err(ConfigError::AmbiguousSchedule(task.name)),
    };

    Ok(TaskSpec {
        name: task.name,
        command: task.command,
        schedule,
    })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
