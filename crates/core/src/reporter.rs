// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduled task reporter
//!
//! Reads every holder at call time and groups its tasks by kind. The
//! reporter keeps no state of its own and never waits on a running task:
//! last executions are read as whole records from each task's outcome slot.
//!
//! A task that cannot be described is left out of the snapshot and logged;
//! the rest of the report is still produced.

use crate::holder::TaskHolder;
use crate::snapshot::{
    millis, CronTaskEntry, CustomTaskEntry, IntervalTaskEntry, NextExecution, Snapshot,
};
use crate::task::TaskSchedule;
use std::sync::Arc;

/// Produces [`Snapshot`]s of the tasks registered with a set of holders
#[derive(Clone, Default)]
pub struct ScheduledTasksReporter {
    holders: Vec<Arc<dyn TaskHolder>>,
}

impl ScheduledTasksReporter {
    pub fn new(holders: Vec<Arc<dyn TaskHolder>>) -> Self {
        Self { holders }
    }

    /// Reporter over a single holder
    pub fn for_holder(holder: Arc<dyn TaskHolder>) -> Self {
        Self::new(vec![holder])
    }

    pub fn report(&self) -> Snapshot {
        let mut snapshot = Snapshot::default();

        for (index, holder) in self.holders.iter().enumerate() {
            for task in holder.scheduled_tasks() {
                let description = match task.describe() {
                    Ok(description) => description,
                    Err(e) => {
                        tracing::warn!(holder = index, error = %e, "task excluded from report");
                        continue;
                    }
                };
                let last_execution = task.last_execution().map(|last| (*last).clone());
                let next_execution = description.next_execution.map(|time| NextExecution { time });
                let runnable = description.runnable;

                match description.schedule {
                    TaskSchedule::Cron { expression } => snapshot.cron.push(CronTaskEntry {
                        runnable,
                        expression,
                        next_execution,
                        last_execution,
                    }),
                    TaskSchedule::FixedDelay {
                        interval,
                        initial_delay,
                    } => snapshot.fixed_delay.push(IntervalTaskEntry {
                        runnable,
                        interval: millis(interval),
                        initial_delay: millis(initial_delay),
                        next_execution,
                        last_execution,
                    }),
                    TaskSchedule::FixedRate {
                        interval,
                        initial_delay,
                    } => snapshot.fixed_rate.push(IntervalTaskEntry {
                        runnable,
                        interval: millis(interval),
                        initial_delay: millis(initial_delay),
                        next_execution,
                        last_execution,
                    }),
                    TaskSchedule::Custom { trigger } => snapshot.custom.push(CustomTaskEntry {
                        runnable,
                        trigger,
                        last_execution,
                    }),
                }
            }
        }

        tracing::debug!(
            cron = snapshot.cron.len(),
            fixed_delay = snapshot.fixed_delay.len(),
            fixed_rate = snapshot.fixed_rate.len(),
            custom = snapshot.custom.len(),
            "scheduled tasks reported"
        );
        snapshot
    }
}

#[cfg(test)]
#[path = "reporter_tests.rs"]
mod tests;
