// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Execution outcomes
//!
//! Each registered task owns an [`ExecutionOutcome`] slot that the
//! scheduling executor overwrites after every run. The slot holds the whole
//! [`LastExecution`] record behind one `Arc`, so a reader always sees a
//! status, time and exception that belong to the same run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, RwLock};

/// Status of the most recent run of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    /// The run has begun and not yet finished
    Started,
    /// The run completed without error
    Success,
    /// The run failed
    Error,
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionStatus::Started => write!(f, "STARTED"),
            ExecutionStatus::Success => write!(f, "SUCCESS"),
            ExecutionStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// Type and message of the error a failed run produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionInfo {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

impl ExceptionInfo {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// Outcome of the most recent run of a task.
///
/// Construct through [`LastExecution::started`], [`LastExecution::success`]
/// or [`LastExecution::error`]; an exception is carried only by errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LastExecution {
    status: ExecutionStatus,
    time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exception: Option<ExceptionInfo>,
}

impl LastExecution {
    pub fn started(time: DateTime<Utc>) -> Self {
        Self {
            status: ExecutionStatus::Started,
            time,
            exception: None,
        }
    }

    pub fn success(time: DateTime<Utc>) -> Self {
        Self {
            status: ExecutionStatus::Success,
            time,
            exception: None,
        }
    }

    pub fn error(time: DateTime<Utc>, exception: ExceptionInfo) -> Self {
        Self {
            status: ExecutionStatus::Error,
            time,
            exception: Some(exception),
        }
    }

    pub fn status(&self) -> ExecutionStatus {
        self.status
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn exception(&self) -> Option<&ExceptionInfo> {
        self.exception.as_ref()
    }
}

/// Error returned by a task body
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct TaskFailure {
    pub kind: String,
    pub message: String,
}

impl TaskFailure {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl From<TaskFailure> for ExceptionInfo {
    fn from(failure: TaskFailure) -> Self {
        ExceptionInfo {
            kind: failure.kind,
            message: failure.message,
        }
    }
}

/// Holder of a task's last execution, swapped as a whole record
#[derive(Debug, Default)]
pub struct ExecutionOutcome {
    last: RwLock<Option<Arc<LastExecution>>>,
}

impl ExecutionOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the recorded outcome
    pub fn record(&self, execution: LastExecution) {
        let execution = Arc::new(execution);
        let mut last = self.last.write().unwrap_or_else(|e| e.into_inner());
        *last = Some(execution);
    }

    /// The most recent outcome, if the task has run
    pub fn last(&self) -> Option<Arc<LastExecution>> {
        self.last
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[cfg(test)]
#[path = "execution_tests.rs"]
mod tests;
