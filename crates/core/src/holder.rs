// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task holder capabilities
//!
//! A task source makes its tasks reportable by implementing [`TaskHolder`]
//! and handing out [`ScheduledTaskHandle`]s.

use crate::execution::LastExecution;
use crate::task::TaskDescription;
use std::sync::Arc;
use thiserror::Error;

/// A task could not be described
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DescribeError {
    #[error("trigger of {target} cannot be described: {reason}")]
    Trigger { target: String, reason: String },
    #[error("task {0} is no longer registered")]
    Unregistered(String),
}

/// One registered task, queried at report time
pub trait ScheduledTaskHandle: Send + Sync {
    fn describe(&self) -> Result<TaskDescription, DescribeError>;

    /// Outcome of the latest run; `None` if the task never ran or does not track outcomes
    fn last_execution(&self) -> Option<Arc<LastExecution>> {
        None
    }
}

/// Source enumerating currently registered tasks
pub trait TaskHolder: Send + Sync {
    /// Tasks in registration order
    fn scheduled_tasks(&self) -> Vec<Arc<dyn ScheduledTaskHandle>>;
}
