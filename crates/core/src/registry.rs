// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task registry
//!
//! The registry is the scheduling subsystem's list of tasks. It is built
//! explicitly and shared through an `Arc`: the scheduler runs what it
//! holds, and the reporter reads it as a [`TaskHolder`].

use crate::cron::{CronError, CronExpression};
use crate::execution::{ExecutionOutcome, LastExecution, TaskFailure};
use crate::holder::{DescribeError, ScheduledTaskHandle, TaskHolder};
use crate::task::{Runnable, TaskDescription, TaskId, TaskSchedule};
use crate::trigger::{CronTrigger, PeriodicTrigger, Trigger};
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Body of a scheduled task
pub type Job = Arc<dyn Fn() -> Result<(), TaskFailure> + Send + Sync>;

/// A task as held by the registry
pub struct RegisteredTask {
    id: TaskId,
    runnable: Runnable,
    trigger: Arc<dyn Trigger>,
    job: Job,
    outcome: ExecutionOutcome,
    next_execution: RwLock<Option<DateTime<Utc>>>,
}

impl RegisteredTask {
    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn runnable(&self) -> &Runnable {
        &self.runnable
    }

    pub fn trigger(&self) -> &Arc<dyn Trigger> {
        &self.trigger
    }

    pub fn outcome(&self) -> &ExecutionOutcome {
        &self.outcome
    }

    /// Invoke the task body
    pub fn run(&self) -> Result<(), TaskFailure> {
        (self.job)()
    }

    pub fn next_execution(&self) -> Option<DateTime<Utc>> {
        *self.next_execution.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Maintained by the scheduler; `None` while running or when unscheduled
    pub fn set_next_execution(&self, at: Option<DateTime<Utc>>) {
        *self.next_execution.write().unwrap_or_else(|e| e.into_inner()) = at;
    }
}

impl fmt::Debug for RegisteredTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredTask")
            .field("id", &self.id)
            .field("runnable", &self.runnable)
            .field("trigger", &self.trigger)
            .finish_non_exhaustive()
    }
}

impl ScheduledTaskHandle for RegisteredTask {
    fn describe(&self) -> Result<TaskDescription, DescribeError> {
        let schedule = match self.trigger.schedule() {
            Some(schedule) => schedule,
            None => TaskSchedule::Custom {
                trigger: self.trigger.describe()?,
            },
        };
        Ok(TaskDescription {
            runnable: self.runnable.clone(),
            schedule,
            next_execution: self.next_execution(),
        })
    }

    fn last_execution(&self) -> Option<Arc<LastExecution>> {
        self.outcome.last()
    }
}

/// Append-only list of registered tasks
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: RwLock<Vec<Arc<RegisteredTask>>>,
    next_id: AtomicU64,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task running on a cron expression
    pub fn add_cron_task<F>(
        &self,
        runnable: impl Into<Runnable>,
        expression: &str,
        job: F,
    ) -> Result<TaskId, CronError>
    where
        F: Fn() -> Result<(), TaskFailure> + Send + Sync + 'static,
    {
        let expression = CronExpression::parse(expression)?;
        Ok(self.add_trigger_task(runnable, Arc::new(CronTrigger::new(expression)), job))
    }

    /// Register a task re-run `interval` after each run completes
    pub fn add_fixed_delay_task<F>(
        &self,
        runnable: impl Into<Runnable>,
        interval: Duration,
        initial_delay: Duration,
        job: F,
    ) -> TaskId
    where
        F: Fn() -> Result<(), TaskFailure> + Send + Sync + 'static,
    {
        let trigger = PeriodicTrigger::fixed_delay(interval, initial_delay);
        self.add_trigger_task(runnable, Arc::new(trigger), job)
    }

    /// Register a task started every `interval`
    pub fn add_fixed_rate_task<F>(
        &self,
        runnable: impl Into<Runnable>,
        interval: Duration,
        initial_delay: Duration,
        job: F,
    ) -> TaskId
    where
        F: Fn() -> Result<(), TaskFailure> + Send + Sync + 'static,
    {
        let trigger = PeriodicTrigger::fixed_rate(interval, initial_delay);
        self.add_trigger_task(runnable, Arc::new(trigger), job)
    }

    /// Register a task driven by an arbitrary trigger
    pub fn add_trigger_task<F>(
        &self,
        runnable: impl Into<Runnable>,
        trigger: Arc<dyn Trigger>,
        job: F,
    ) -> TaskId
    where
        F: Fn() -> Result<(), TaskFailure> + Send + Sync + 'static,
    {
        let id = TaskId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let task = RegisteredTask {
            id,
            runnable: runnable.into(),
            trigger,
            job: Arc::new(job),
            outcome: ExecutionOutcome::new(),
            next_execution: RwLock::new(None),
        };
        tracing::debug!(
            task = %id,
            runnable = %task.runnable,
            trigger = ?task.trigger,
            "registered"
        );
        self.tasks
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(Arc::new(task));
        id
    }

    /// Snapshot of the registered tasks in registration order
    pub fn tasks(&self) -> Vec<Arc<RegisteredTask>> {
        self.tasks.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn get(&self, id: TaskId) -> Option<Arc<RegisteredTask>> {
        self.tasks
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|t| t.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.tasks.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TaskHolder for TaskRegistry {
    fn scheduled_tasks(&self) -> Vec<Arc<dyn ScheduledTaskHandle>> {
        self.tasks()
            .into_iter()
            .map(|t| t as Arc<dyn ScheduledTaskHandle>)
            .collect()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
