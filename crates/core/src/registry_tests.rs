// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::execution::ExecutionStatus;
use crate::task::TaskKind;
use crate::trigger::TriggerContext;

fn ok() -> Result<(), TaskFailure> {
    Ok(())
}

#[derive(Debug)]
struct Opaque;

impl Trigger for Opaque {
    fn next_execution(&self, _ctx: &TriggerContext) -> Option<DateTime<Utc>> {
        None
    }

    fn describe(&self) -> Result<String, DescribeError> {
        Err(DescribeError::Trigger {
            target: "opaque".to_string(),
            reason: "no description".to_string(),
        })
    }
}

#[test]
fn registration_assigns_sequential_ids_in_order() {
    let registry = TaskRegistry::new();
    let a = registry
        .add_cron_task("orders", "0 0 0/3 1/1 * ?", ok)
        .unwrap();
    let b = registry.add_fixed_delay_task("purge", Duration::from_secs(5), Duration::ZERO, ok);

    assert_eq!(a, TaskId(0));
    assert_eq!(b, TaskId(1));
    assert_eq!(registry.len(), 2);

    let targets: Vec<_> = registry
        .tasks()
        .iter()
        .map(|t| t.runnable().target.clone())
        .collect();
    assert_eq!(targets, vec!["orders", "purge"]);
}

#[test]
fn invalid_cron_expression_is_not_registered() {
    let registry = TaskRegistry::new();
    let result = registry.add_cron_task("bad", "not a cron", ok);

    assert!(matches!(result, Err(CronError::FieldCount { found: 3, .. })));
    assert!(registry.is_empty());
}

#[test]
fn built_in_triggers_describe_their_kind() {
    let registry = TaskRegistry::new();
    registry.add_cron_task("c", "@daily", ok).unwrap();
    registry.add_fixed_delay_task("d", Duration::from_secs(5), Duration::ZERO, ok);
    registry.add_fixed_rate_task("r", Duration::from_secs(3), Duration::from_secs(10), ok);

    let kinds: Vec<_> = registry
        .tasks()
        .iter()
        .map(|t| t.describe().unwrap().schedule.kind())
        .collect();
    assert_eq!(
        kinds,
        vec![TaskKind::Cron, TaskKind::FixedDelay, TaskKind::FixedRate]
    );
}

#[test]
fn trigger_task_with_cron_trigger_is_reported_as_cron() {
    let registry = TaskRegistry::new();
    let trigger = CronTrigger::new(CronExpression::parse("0 30 * * * *").unwrap());
    let id = registry.add_trigger_task("t", Arc::new(trigger), ok);

    let description = registry.get(id).unwrap().describe().unwrap();
    assert_eq!(
        description.schedule,
        TaskSchedule::Cron {
            expression: "0 30 * * * *".to_string()
        }
    );
}

#[test]
fn undescribable_trigger_fails_description() {
    let registry = TaskRegistry::new();
    let id = registry.add_trigger_task("t", Arc::new(Opaque), ok);

    let err = registry.get(id).unwrap().describe().unwrap_err();
    assert!(matches!(err, DescribeError::Trigger { .. }));
}

#[test]
fn next_execution_is_part_of_description() {
    let registry = TaskRegistry::new();
    let id = registry.add_fixed_rate_task("r", Duration::from_secs(1), Duration::ZERO, ok);
    let task = registry.get(id).unwrap();
    assert!(task.describe().unwrap().next_execution.is_none());

    let at = Utc::now();
    task.set_next_execution(Some(at));
    assert_eq!(task.describe().unwrap().next_execution, Some(at));
}

#[test]
fn run_invokes_job_and_outcome_is_exposed_to_holder() {
    let registry = TaskRegistry::new();
    let id = registry.add_fixed_delay_task("fail", Duration::from_secs(1), Duration::ZERO, || {
        Err(TaskFailure::new("IllegalState", "nope"))
    });
    let task = registry.get(id).unwrap();

    let failure = task.run().unwrap_err();
    task.outcome()
        .record(LastExecution::error(Utc::now(), failure.into()));

    let handles = registry.scheduled_tasks();
    assert_eq!(handles.len(), 1);
    let last = handles[0].last_execution().unwrap();
    assert_eq!(last.status(), ExecutionStatus::Error);
}

#[test]
fn registration_is_visible_to_concurrent_holders() {
    let registry = Arc::new(TaskRegistry::new());
    let writers: Vec<_> = (0..4)
        .map(|i| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                for j in 0..25 {
                    registry.add_fixed_delay_task(
                        format!("w{i}-{j}"),
                        Duration::from_secs(1),
                        Duration::ZERO,
                        ok,
                    );
                    assert!(!registry.scheduled_tasks().is_empty());
                }
            })
        })
        .collect();
    for w in writers {
        w.join().unwrap();
    }
    assert_eq!(registry.len(), 100);
}
