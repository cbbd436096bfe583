// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.

use std::fmt;
use std::path::Path;
use tasklens_core::ConfigError;

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct CliError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Error for a task configuration that failed to load.
    pub fn config(path: &Path, err: &ConfigError) -> Self {
        let base = CliError::new(format!("Cannot use task configuration '{}'", path.display()))
            .with_context(err.to_string());
        match err {
            ConfigError::Io { .. } => base.with_suggestion("Check the path passed to --config"),
            ConfigError::Parse(_) => base
                .with_suggestion("Each task is a [[task]] table with name, command and a schedule"),
            ConfigError::MissingSchedule(_) | ConfigError::AmbiguousSchedule(_) => {
                base.with_suggestion("Set exactly one of cron, fixed_delay or fixed_rate")
            }
            ConfigError::Cron { .. } => base.with_suggestion(
                "Cron expressions have 6 fields: second minute hour day-of-month month day-of-week",
            ),
            ConfigError::ZeroInterval(_) => {
                base.with_suggestion("Use a positive duration such as \"500ms\" or \"5s\"")
            }
            ConfigError::UnexpectedInitialDelay(_) => {
                base.with_suggestion("Remove initial_delay from cron tasks")
            }
            ConfigError::EmptyCommand(_) => base.with_suggestion("Give the task a shell command"),
            ConfigError::DuplicateName(_) => base.with_suggestion("Give every task a unique name"),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for CliError {}
