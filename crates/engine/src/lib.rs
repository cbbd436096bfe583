// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tasklens scheduling engine
//!
//! Runs the tasks held by a [`TaskRegistry`](tasklens_core::TaskRegistry),
//! recording each run's outcome and keeping next execution times current.

mod command;
mod error;
mod executor;
mod runtime;
mod scheduler;

pub use command::{build_registry, command_job};
pub use error::RuntimeError;
pub use executor::{ExecutionReport, TaskExecutor};
pub use runtime::Runtime;
pub use scheduler::Scheduler;
