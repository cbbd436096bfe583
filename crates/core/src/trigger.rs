// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Triggers decide when a task runs next
//!
//! The built-in triggers cover cron expressions and periodic (fixed delay
//! or fixed rate) schedules. Anything else implements [`Trigger`] directly
//! and is reported as a custom-trigger task.

use crate::cron::CronExpression;
use crate::holder::DescribeError;
use crate::task::TaskSchedule;
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

/// Times of a task's previous execution, as seen by its trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerContext {
    /// Current time according to the scheduler's clock
    pub now: DateTime<Utc>,
    /// When the previous run was due
    pub last_scheduled: Option<DateTime<Utc>>,
    /// When the previous run actually started
    pub last_actual: Option<DateTime<Utc>>,
    /// When the previous run finished
    pub last_completion: Option<DateTime<Utc>>,
}

impl TriggerContext {
    /// Context for a task that has never run
    pub fn initial(now: DateTime<Utc>) -> Self {
        Self {
            now,
            last_scheduled: None,
            last_actual: None,
            last_completion: None,
        }
    }
}

/// Strategy computing the next execution time of a task
pub trait Trigger: Send + Sync + fmt::Debug {
    /// Next execution time, or `None` if the task should not run again
    fn next_execution(&self, ctx: &TriggerContext) -> Option<DateTime<Utc>>;

    /// Human-readable description of the trigger
    fn describe(&self) -> Result<String, DescribeError> {
        Ok(std::any::type_name::<Self>().to_string())
    }

    /// Schedule this trigger corresponds to, if it is one of the built-in kinds
    fn schedule(&self) -> Option<TaskSchedule> {
        None
    }
}

/// Trigger firing on a cron expression
#[derive(Debug, Clone)]
pub struct CronTrigger {
    expression: CronExpression,
}

impl CronTrigger {
    pub fn new(expression: CronExpression) -> Self {
        Self { expression }
    }

    pub fn expression(&self) -> &CronExpression {
        &self.expression
    }
}

impl Trigger for CronTrigger {
    fn next_execution(&self, ctx: &TriggerContext) -> Option<DateTime<Utc>> {
        // A run that finished before its slot (clock skew) must not fire the same slot again
        let base = match (ctx.last_completion, ctx.last_scheduled) {
            (Some(done), Some(due)) => done.max(due),
            (Some(done), None) => done,
            (None, _) => ctx.now,
        };
        self.expression.next_after(base)
    }

    fn describe(&self) -> Result<String, DescribeError> {
        Ok(self.expression.to_string())
    }

    fn schedule(&self) -> Option<TaskSchedule> {
        Some(TaskSchedule::Cron {
            expression: self.expression.to_string(),
        })
    }
}

/// Trigger firing at a fixed delay or a fixed rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicTrigger {
    period: Duration,
    initial_delay: Duration,
    fixed_rate: bool,
}

impl PeriodicTrigger {
    /// Next run starts `period` after the previous one finished
    pub fn fixed_delay(period: Duration, initial_delay: Duration) -> Self {
        Self {
            period,
            initial_delay,
            fixed_rate: false,
        }
    }

    /// Next run starts `period` after the previous one was due
    pub fn fixed_rate(period: Duration, initial_delay: Duration) -> Self {
        Self {
            period,
            initial_delay,
            fixed_rate: true,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    pub fn is_fixed_rate(&self) -> bool {
        self.fixed_rate
    }
}

fn add(time: DateTime<Utc>, duration: Duration) -> Option<DateTime<Utc>> {
    let delta = chrono::Duration::from_std(duration).ok()?;
    time.checked_add_signed(delta)
}

impl Trigger for PeriodicTrigger {
    fn next_execution(&self, ctx: &TriggerContext) -> Option<DateTime<Utc>> {
        let Some(last_scheduled) = ctx.last_scheduled else {
            return add(ctx.now, self.initial_delay);
        };
        if self.fixed_rate {
            add(last_scheduled, self.period)
        } else {
            add(ctx.last_completion.unwrap_or(ctx.now), self.period)
        }
    }

    fn describe(&self) -> Result<String, DescribeError> {
        let kind = if self.fixed_rate { "fixed rate" } else { "fixed delay" };
        Ok(format!(
            "{} {}ms (initial delay {}ms)",
            kind,
            self.period.as_millis(),
            self.initial_delay.as_millis()
        ))
    }

    fn schedule(&self) -> Option<TaskSchedule> {
        Some(if self.fixed_rate {
            TaskSchedule::FixedRate {
                interval: self.period,
                initial_delay: self.initial_delay,
            }
        } else {
            TaskSchedule::FixedDelay {
                interval: self.period,
                initial_delay: self.initial_delay,
            }
        })
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
