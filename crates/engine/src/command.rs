// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shell-command task bodies

use std::process::{Command, Stdio};
use std::sync::Arc;
use tasklens_core::{CronTrigger, ScheduleSpec, TaskFailure, TaskRegistry, TasksConfig};

/// Longest stderr excerpt carried into a failure message
const STDERR_TAIL: usize = 200;

/// Task body running `command` through `sh -c`
pub fn command_job(
    command: impl Into<String>,
) -> impl Fn() -> Result<(), TaskFailure> + Send + Sync + 'static {
    let command = command.into();
    move || run_command(&command)
}

fn run_command(command: &str) -> Result<(), TaskFailure> {
    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::null())
        .output()
        .map_err(|e| TaskFailure::new("SpawnFailed", e.to_string()))?;

    if output.status.success() {
        return Ok(());
    }

    let mut message = match output.status.code() {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    };
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        let start = stderr
            .char_indices()
            .rev()
            .nth(STDERR_TAIL - 1)
            .map_or(0, |(i, _)| i);
        message.push_str(": ");
        message.push_str(&stderr[start..]);
    }
    Err(TaskFailure::new("CommandFailed", message))
}

/// Register every configured task with a command body
pub fn build_registry(config: &TasksConfig) -> TaskRegistry {
    let registry = TaskRegistry::new();
    for task in &config.tasks {
        let job = command_job(task.command.clone());
        match &task.schedule {
            ScheduleSpec::Cron(expression) => {
                registry.add_trigger_task(
                    task.name.clone(),
                    Arc::new(CronTrigger::new(expression.clone())),
                    job,
                );
            }
            ScheduleSpec::FixedDelay {
                interval,
                initial_delay,
            } => {
                registry.add_fixed_delay_task(task.name.clone(), *interval, *initial_delay, job);
            }
            ScheduleSpec::FixedRate {
                interval,
                initial_delay,
            } => {
                registry.add_fixed_rate_task(task.name.clone(), *interval, *initial_delay, job);
            }
        }
    }
    tracing::info!(tasks = registry.len(), "registry built from configuration");
    registry
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
