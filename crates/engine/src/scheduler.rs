// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timer bookkeeping for scheduled tasks

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tasklens_core::TaskId;

/// Pending deadlines, at most one per task
#[derive(Debug, Default)]
pub struct Scheduler {
    timers: HashMap<TaskId, DateTime<Utc>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm (or re-arm) the timer for a task
    pub fn set_timer(&mut self, id: TaskId, at: DateTime<Utc>) {
        self.timers.insert(id, at);
    }

    pub fn cancel_timer(&mut self, id: TaskId) {
        self.timers.remove(&id);
    }

    /// Remove and return timers due at `now`, earliest first
    pub fn fired_timers(&mut self, now: DateTime<Utc>) -> Vec<(TaskId, DateTime<Utc>)> {
        let mut fired: Vec<_> = self
            .timers
            .iter()
            .filter(|(_, at)| **at <= now)
            .map(|(id, at)| (*id, *at))
            .collect();
        fired.sort_by_key(|(id, at)| (*at, *id));
        for (id, _) in &fired {
            self.timers.remove(id);
        }
        fired
    }

    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.timers.values().min().copied()
    }

    pub fn has_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    pub fn deadline(&self, id: TaskId) -> Option<DateTime<Utc>> {
        self.timers.get(&id).copied()
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
