// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tasklens-core: scheduled task model and reporting
//!
//! This crate provides:
//! - The task model: runnables, schedules and execution outcomes
//! - Cron expressions and the built-in triggers
//! - The task registry and the holder traits the reporter reads from
//! - The reporter producing point-in-time snapshots
//! - TOML task configuration

pub mod clock;
pub mod config;
pub mod cron;
pub mod execution;
pub mod holder;
pub mod registry;
pub mod reporter;
pub mod snapshot;
pub mod task;
pub mod trigger;

pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, ScheduleSpec, TaskSpec, TasksConfig};
pub use crate::cron::{CronError, CronExpression};
pub use execution::{
    ExceptionInfo, ExecutionOutcome, ExecutionStatus, LastExecution, TaskFailure,
};
pub use holder::{DescribeError, ScheduledTaskHandle, TaskHolder};
pub use registry::{Job, RegisteredTask, TaskRegistry};
pub use reporter::ScheduledTasksReporter;
pub use snapshot::{CronTaskEntry, CustomTaskEntry, IntervalTaskEntry, NextExecution, Snapshot};
pub use task::{Runnable, TaskDescription, TaskId, TaskKind, TaskSchedule};
pub use trigger::{CronTrigger, PeriodicTrigger, Trigger, TriggerContext};
