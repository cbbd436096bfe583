// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runs a single task and records its outcome
//!
//! A failing or panicking task body never escapes the executor: the
//! failure is stored as the task's last execution and the scheduler keeps
//! going.

use chrono::{DateTime, Utc};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;
use tasklens_core::{
    Clock, ExecutionStatus, LastExecution, RegisteredTask, TaskFailure, TaskId,
};

/// Timing and status of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReport {
    pub task: TaskId,
    pub started: DateTime<Utc>,
    pub completed: DateTime<Utc>,
    pub status: ExecutionStatus,
}

/// Executes task bodies against a clock
#[derive(Debug, Clone)]
pub struct TaskExecutor<C: Clock> {
    clock: C,
}

impl<C: Clock> TaskExecutor<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn execute(&self, task: &RegisteredTask) -> ExecutionReport {
        let span =
            tracing::info_span!("task.execute", task = %task.id(), runnable = %task.runnable());
        let _guard = span.enter();

        let started = self.clock.now();
        task.outcome().record(LastExecution::started(started));

        let start = Instant::now();
        let result = catch_unwind(AssertUnwindSafe(|| task.run()))
            .unwrap_or_else(|payload| Err(TaskFailure::new("panic", panic_message(&*payload))));
        let elapsed_ms = start.elapsed().as_millis() as u64;
        let completed = self.clock.now();

        let status = match result {
            Ok(()) => {
                tracing::debug!(elapsed_ms, "completed");
                task.outcome().record(LastExecution::success(completed));
                ExecutionStatus::Success
            }
            Err(failure) => {
                tracing::warn!(elapsed_ms, error = %failure, "failed");
                task.outcome()
                    .record(LastExecution::error(completed, failure.into()));
                ExecutionStatus::Error
            }
        };

        ExecutionReport {
            task: task.id(),
            started,
            completed,
            status,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "task panicked".to_string()
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
