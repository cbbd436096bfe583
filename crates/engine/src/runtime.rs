// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scheduling runtime
//!
//! Owns the timers for every task in a registry. Each task is armed from
//! its trigger, run when due, and re-armed from the trigger once the run
//! completes, so a task never overlaps itself. Tasks registered after the
//! runtime started are picked up on the next pass.

use crate::error::RuntimeError;
use crate::executor::{ExecutionReport, TaskExecutor};
use crate::scheduler::Scheduler;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tasklens_core::{Clock, RegisteredTask, TaskId, TaskRegistry, TriggerContext};
use tokio::sync::watch;
use tokio::task::JoinSet;

/// Longest sleep between passes, bounding how late new registrations are noticed
const IDLE_POLL: Duration = Duration::from_secs(1);

/// Result of a run dispatched to the blocking pool
struct Completion {
    task: Arc<RegisteredTask>,
    due: DateTime<Utc>,
    report: ExecutionReport,
}

/// Drives the tasks of a registry
pub struct Runtime<C: Clock> {
    registry: Arc<TaskRegistry>,
    executor: TaskExecutor<C>,
    clock: C,
    scheduler: Scheduler,
    known: HashSet<TaskId>,
}

impl<C: Clock> Runtime<C> {
    pub fn new(registry: Arc<TaskRegistry>, clock: C) -> Self {
        Self {
            registry,
            executor: TaskExecutor::new(clock.clone()),
            clock,
            scheduler: Scheduler::new(),
            known: HashSet::new(),
        }
    }

    pub fn registry(&self) -> &Arc<TaskRegistry> {
        &self.registry
    }

    /// Arm the first execution of every task not yet seen
    pub fn start(&mut self) {
        let now = self.clock.now();
        for task in self.registry.tasks() {
            if self.known.insert(task.id()) {
                self.schedule(&task, &TriggerContext::initial(now));
            }
        }
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.scheduler.next_deadline()
    }

    /// One synchronous scheduling pass: run every due task inline.
    ///
    /// Returns the number of tasks run.
    pub fn tick(&mut self) -> usize {
        self.start();
        let due = self.scheduler.fired_timers(self.clock.now());
        let mut ran = 0;
        for (id, due_at) in due {
            let Some(task) = self.registry.get(id) else {
                continue;
            };
            task.set_next_execution(None);
            let report = self.executor.execute(&task);
            self.complete(&task, due_at, &report);
            ran += 1;
        }
        ran
    }

    /// Run tasks on the blocking pool until `shutdown` turns true or its sender is dropped.
    ///
    /// In-flight runs are awaited before returning; they are not rescheduled.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> Result<(), RuntimeError> {
        tracing::info!(tasks = self.registry.len(), "scheduler started");
        let mut in_flight: JoinSet<Completion> = JoinSet::new();

        while !*shutdown.borrow() {
            self.start();
            let now = self.clock.now();
            for (id, due) in self.scheduler.fired_timers(now) {
                let Some(task) = self.registry.get(id) else {
                    continue;
                };
                task.set_next_execution(None);
                let executor = self.executor.clone();
                tracing::debug!(task = %id, "dispatching");
                in_flight.spawn_blocking(move || {
                    let report = executor.execute(&task);
                    Completion { task, due, report }
                });
            }

            let sleep_for = self
                .scheduler
                .next_deadline()
                .map(|at| (at - now).to_std().unwrap_or(Duration::ZERO))
                .map_or(IDLE_POLL, |d| d.min(IDLE_POLL));

            tokio::select! {
                _ = tokio::time::sleep(sleep_for) => {}
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    let done = joined?;
                    self.complete(&done.task, done.due, &done.report);
                }
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        tracing::info!(in_flight = in_flight.len(), "scheduler stopping");
        while let Some(joined) = in_flight.join_next().await {
            joined?;
        }
        tracing::info!("scheduler stopped");
        Ok(())
    }

    fn complete(&mut self, task: &RegisteredTask, due: DateTime<Utc>, report: &ExecutionReport) {
        let ctx = TriggerContext {
            now: self.clock.now(),
            last_scheduled: Some(due),
            last_actual: Some(report.started),
            last_completion: Some(report.completed),
        };
        self.schedule(task, &ctx);
    }

    fn schedule(&mut self, task: &RegisteredTask, ctx: &TriggerContext) {
        match task.trigger().next_execution(ctx) {
            Some(at) => {
                tracing::debug!(task = %task.id(), next = %at, "scheduled");
                self.scheduler.set_timer(task.id(), at);
                task.set_next_execution(Some(at));
            }
            None => {
                tracing::info!(task = %task.id(), runnable = %task.runnable(), "trigger exhausted");
                self.scheduler.cancel_timer(task.id());
                task.set_next_execution(None);
            }
        }
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
