// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduled task descriptions
//!
//! A task is described by what it runs ([`Runnable`]) and how it is
//! triggered ([`TaskSchedule`]). The schedule is a closed set of variants,
//! each carrying only the parameters that apply to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Unique identifier for a registered task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task-{}", self.0)
    }
}

/// What a task runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Runnable {
    pub target: String,
}

impl Runnable {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

impl fmt::Display for Runnable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.target)
    }
}

impl From<&str> for Runnable {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Runnable {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// The kind of trigger driving a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Cron,
    FixedDelay,
    FixedRate,
    Custom,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKind::Cron => write!(f, "cron"),
            TaskKind::FixedDelay => write!(f, "fixed-delay"),
            TaskKind::FixedRate => write!(f, "fixed-rate"),
            TaskKind::Custom => write!(f, "custom"),
        }
    }
}

/// Scheduling parameters, one variant per kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskSchedule {
    Cron {
        expression: String,
    },
    /// `interval` is measured from the end of one run to the start of the next
    FixedDelay {
        interval: Duration,
        initial_delay: Duration,
    },
    /// `interval` is measured between the starts of consecutive runs
    FixedRate {
        interval: Duration,
        initial_delay: Duration,
    },
    Custom {
        trigger: String,
    },
}

impl TaskSchedule {
    pub fn kind(&self) -> TaskKind {
        match self {
            TaskSchedule::Cron { .. } => TaskKind::Cron,
            TaskSchedule::FixedDelay { .. } => TaskKind::FixedDelay,
            TaskSchedule::FixedRate { .. } => TaskKind::FixedRate,
            TaskSchedule::Custom { .. } => TaskKind::Custom,
        }
    }
}

/// Everything a holder can say about one task at a point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDescription {
    pub runnable: Runnable,
    pub schedule: TaskSchedule,
    pub next_execution: Option<DateTime<Utc>>,
}
