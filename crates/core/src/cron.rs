// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cron expressions
//!
//! Six whitespace-separated fields: `second minute hour day-of-month month
//! day-of-week`. The `?` placeholder is accepted in either day field and
//! means "no specific value". The usual `@hourly`-style macros are expanded
//! before parsing.

use chrono::{DateTime, Utc};
use ::cron::Schedule;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing a cron expression
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CronError {
    #[error("cron expression '{expression}' must have 6 fields, found {found}")]
    FieldCount { expression: String, found: usize },
    #[error("invalid cron expression '{expression}': {reason}")]
    Invalid { expression: String, reason: String },
}

/// A parsed cron expression that remembers its source text
#[derive(Clone)]
pub struct CronExpression {
    source: String,
    schedule: Box<Schedule>,
}

impl CronExpression {
    /// Parse a cron expression
    pub fn parse(expression: &str) -> Result<Self, CronError> {
        let trimmed = expression.trim();
        let expanded = expand_macro(trimmed).unwrap_or(trimmed);

        let fields: Vec<&str> = expanded.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(CronError::FieldCount {
                expression: expression.to_string(),
                found: fields.len(),
            });
        }

        // `?` only says "don't care"; the parser wants `*`
        let normalized = fields
            .iter()
            .map(|f| if *f == "?" { "*" } else { *f })
            .collect::<Vec<_>>()
            .join(" ");

        let schedule = Schedule::from_str(&normalized).map_err(|e| CronError::Invalid {
            expression: expression.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            source: trimmed.to_string(),
            schedule: Box::new(schedule),
        })
    }

    /// The expression as written
    pub fn expression(&self) -> &str {
        &self.source
    }

    /// First matching time strictly after `after`
    pub fn next_after(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule.after(&after).next()
    }
}

fn expand_macro(expression: &str) -> Option<&'static str> {
    match expression.to_ascii_lowercase().as_str() {
        "@yearly" | "@annually" => Some("0 0 0 1 1 *"),
        "@monthly" => Some("0 0 0 1 * *"),
        "@weekly" => Some("0 0 0 * * Sun"),
        "@daily" | "@midnight" => Some("0 0 0 * * *"),
        "@hourly" => Some("0 0 * * * *"),
        _ => None,
    }
}

impl FromStr for CronExpression {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CronExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl fmt::Debug for CronExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CronExpression").field(&self.source).finish()
    }
}

impl PartialEq for CronExpression {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for CronExpression {}

#[cfg(test)]
#[path = "cron_tests.rs"]
mod tests;
