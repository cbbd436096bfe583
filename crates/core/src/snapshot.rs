// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Point-in-time report of scheduled tasks
//!
//! Serializes to the document shape consumers expect: four arrays keyed
//! `cron`, `fixedDelay`, `fixedRate` and `custom`, camelCase fields,
//! intervals in milliseconds and absent values omitted.

use crate::execution::LastExecution;
use crate::task::Runnable;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// When a task is next due
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextExecution {
    pub time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CronTaskEntry {
    pub runnable: Runnable,
    pub expression: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_execution: Option<NextExecution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_execution: Option<LastExecution>,
}

/// Entry for fixed-delay and fixed-rate tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalTaskEntry {
    pub runnable: Runnable,
    /// Milliseconds
    pub interval: u64,
    /// Milliseconds
    pub initial_delay: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_execution: Option<NextExecution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_execution: Option<LastExecution>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTaskEntry {
    pub runnable: Runnable,
    pub trigger: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_execution: Option<LastExecution>,
}

/// All reported tasks grouped by kind, each group in enumeration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub cron: Vec<CronTaskEntry>,
    pub fixed_delay: Vec<IntervalTaskEntry>,
    pub fixed_rate: Vec<IntervalTaskEntry>,
    pub custom: Vec<CustomTaskEntry>,
}

impl Snapshot {
    /// Total number of entries across all groups
    pub fn len(&self) -> usize {
        self.cron.len() + self.fixed_delay.len() + self.fixed_rate.len() + self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn write_timing(
    f: &mut fmt::Formatter<'_>,
    next: Option<&NextExecution>,
    last: Option<&LastExecution>,
) -> fmt::Result {
    if let Some(next) = next {
        write!(f, "  next={}", timestamp(next.time))?;
    }
    if let Some(last) = last {
        write!(f, "  last={}@{}", last.status(), timestamp(last.time()))?;
        if let Some(exception) = last.exception() {
            write!(f, " ({}: {})", exception.kind, exception.message)?;
        }
    }
    Ok(())
}

fn write_interval_group(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    entries: &[IntervalTaskEntry],
) -> fmt::Result {
    writeln!(f, "{}:", title)?;
    if entries.is_empty() {
        writeln!(f, "  (none)")?;
    }
    for e in entries {
        write!(
            f,
            "  {}  every {}ms after {}ms",
            e.runnable, e.interval, e.initial_delay
        )?;
        write_timing(f, e.next_execution.as_ref(), e.last_execution.as_ref())?;
        writeln!(f)?;
    }
    Ok(())
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "cron:")?;
        if self.cron.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for e in &self.cron {
            write!(f, "  {}  [{}]", e.runnable, e.expression)?;
            write_timing(f, e.next_execution.as_ref(), e.last_execution.as_ref())?;
            writeln!(f)?;
        }

        write_interval_group(f, "fixed delay", &self.fixed_delay)?;
        write_interval_group(f, "fixed rate", &self.fixed_rate)?;

        writeln!(f, "custom:")?;
        if self.custom.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for e in &self.custom {
            write!(f, "  {}  trigger={}", e.runnable, e.trigger)?;
            write_timing(f, None, e.last_execution.as_ref())?;
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
