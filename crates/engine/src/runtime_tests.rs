// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::TimeZone;
use std::sync::atomic::{AtomicUsize, Ordering};
use tasklens_core::{
    ExecutionStatus, FakeClock, ScheduledTasksReporter, SystemClock, TaskFailure, Trigger,
};

fn t(h: u32, m: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, h, m, s).unwrap()
}

fn ok() -> Result<(), TaskFailure> {
    Ok(())
}

/// Fires immediately, then hourly after each completion
#[derive(Debug)]
struct CustomTrigger;

impl Trigger for CustomTrigger {
    fn next_execution(&self, ctx: &TriggerContext) -> Option<DateTime<Utc>> {
        match ctx.last_completion {
            None => Some(ctx.now),
            Some(done) => Some(done + chrono::Duration::hours(1)),
        }
    }
}

/// Fires once and never again
#[derive(Debug)]
struct Once;

impl Trigger for Once {
    fn next_execution(&self, ctx: &TriggerContext) -> Option<DateTime<Utc>> {
        ctx.last_scheduled.is_none().then_some(ctx.now)
    }
}

fn counter() -> (Arc<AtomicUsize>, impl Fn() -> Result<(), TaskFailure> + Send + Sync + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let job = {
        let count = Arc::clone(&count);
        move || {
            count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    };
    (count, job)
}

#[test]
fn one_pass_reports_one_task_per_kind() {
    let clock = FakeClock::at(t(1, 0, 0));
    let registry = Arc::new(TaskRegistry::new());
    registry
        .add_cron_task("com.example.Processor.processOrders", "0 0 0/3 1/1 * ?", ok)
        .unwrap();
    registry.add_fixed_delay_task(
        "com.example.Processor.purge",
        Duration::from_millis(5000),
        Duration::ZERO,
        ok,
    );
    registry.add_fixed_rate_task(
        "com.example.Processor.retrieveIssues",
        Duration::from_millis(3000),
        Duration::from_millis(10000),
        ok,
    );
    registry.add_trigger_task("com.example.Processor$CustomTriggeredRunnable", Arc::new(CustomTrigger), || {
        Err(TaskFailure::new(
            "IllegalStateException",
            "Failed while running custom task",
        ))
    });

    let mut runtime = Runtime::new(Arc::clone(&registry), clock.clone());
    runtime.start();
    assert_eq!(runtime.tick(), 2);

    let snapshot = ScheduledTasksReporter::for_holder(registry).report();
    assert_eq!(snapshot.cron.len(), 1);
    assert_eq!(snapshot.fixed_delay.len(), 1);
    assert_eq!(snapshot.fixed_rate.len(), 1);
    assert_eq!(snapshot.custom.len(), 1);

    let custom = snapshot.custom[0].last_execution.as_ref().unwrap();
    assert_eq!(custom.status(), ExecutionStatus::Error);
    assert!(!custom.exception().unwrap().kind.is_empty());

    let purge = snapshot.fixed_delay[0].last_execution.as_ref().unwrap();
    assert_eq!(purge.status(), ExecutionStatus::Success);

    assert!(snapshot.cron[0].last_execution.is_none());
    assert_eq!(snapshot.cron[0].next_execution.as_ref().unwrap().time, t(3, 0, 0));
    assert!(snapshot.fixed_rate[0].last_execution.is_none());
    assert_eq!(
        snapshot.fixed_rate[0].next_execution.as_ref().unwrap().time,
        t(1, 0, 10)
    );
    assert_eq!(
        snapshot.fixed_delay[0].next_execution.as_ref().unwrap().time,
        t(1, 0, 5)
    );
}

#[test]
fn nothing_runs_before_it_is_due() {
    let clock = FakeClock::at(t(1, 0, 0));
    let registry = Arc::new(TaskRegistry::new());
    let (count, job) = counter();
    registry.add_fixed_rate_task("r", Duration::from_secs(3), Duration::from_secs(10), job);

    let mut runtime = Runtime::new(registry, clock.clone());
    runtime.start();
    assert_eq!(runtime.next_deadline(), Some(t(1, 0, 10)));

    clock.advance(Duration::from_secs(9));
    assert_eq!(runtime.tick(), 0);
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn fixed_rate_keeps_cadence_from_due_times() {
    let clock = FakeClock::at(t(1, 0, 0));
    let registry = Arc::new(TaskRegistry::new());
    let (count, job) = counter();
    let id = registry.add_fixed_rate_task("r", Duration::from_secs(3), Duration::ZERO, job);

    let mut runtime = Runtime::new(Arc::clone(&registry), clock.clone());
    runtime.tick();
    // Pass happens late; the next slot still counts from the due time
    clock.advance(Duration::from_secs(4));
    runtime.tick();

    assert_eq!(count.load(Ordering::SeqCst), 2);
    assert_eq!(registry.get(id).unwrap().next_execution(), Some(t(1, 0, 6)));
}

#[test]
fn fixed_delay_counts_from_completion() {
    let clock = FakeClock::at(t(1, 0, 0));
    let registry = Arc::new(TaskRegistry::new());
    let id = registry.add_fixed_delay_task("d", Duration::from_secs(5), Duration::ZERO, ok);

    let mut runtime = Runtime::new(Arc::clone(&registry), clock.clone());
    runtime.tick();
    clock.advance(Duration::from_secs(7));
    runtime.tick();

    assert_eq!(registry.get(id).unwrap().next_execution(), Some(t(1, 0, 12)));
}

#[test]
fn exhausted_trigger_is_not_rescheduled() {
    let clock = FakeClock::at(t(1, 0, 0));
    let registry = Arc::new(TaskRegistry::new());
    let (count, job) = counter();
    let id = registry.add_trigger_task("once", Arc::new(Once), job);

    let mut runtime = Runtime::new(Arc::clone(&registry), clock.clone());
    assert_eq!(runtime.tick(), 1);
    clock.advance(Duration::from_secs(3600));
    assert_eq!(runtime.tick(), 0);

    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(registry.get(id).unwrap().next_execution().is_none());
    assert!(runtime.next_deadline().is_none());
}

#[test]
fn tasks_registered_later_are_picked_up() {
    let clock = FakeClock::at(t(1, 0, 0));
    let registry = Arc::new(TaskRegistry::new());
    let mut runtime = Runtime::new(Arc::clone(&registry), clock.clone());
    runtime.start();
    assert_eq!(runtime.tick(), 0);

    let (count, job) = counter();
    registry.add_fixed_delay_task("late", Duration::from_secs(1), Duration::ZERO, job);
    assert_eq!(runtime.tick(), 1);
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn run_executes_until_shutdown() {
    let registry = Arc::new(TaskRegistry::new());
    let (count, job) = counter();
    let id = registry.add_fixed_delay_task("d", Duration::from_millis(10), Duration::ZERO, job);

    let (tx, rx) = watch::channel(false);
    let handle = tokio::spawn(Runtime::new(Arc::clone(&registry), SystemClock).run(rx));

    tokio::time::sleep(Duration::from_millis(300)).await;
    tx.send(true).unwrap();
    handle.await.unwrap().unwrap();

    assert!(count.load(Ordering::SeqCst) >= 2);
    let last = registry.get(id).unwrap().outcome().last().unwrap();
    assert_eq!(last.status(), ExecutionStatus::Success);
}

#[tokio::test]
async fn run_stops_when_shutdown_sender_is_dropped() {
    let registry = Arc::new(TaskRegistry::new());
    let (tx, rx) = watch::channel(false);
    let handle = tokio::spawn(Runtime::new(registry, SystemClock).run(rx));

    drop(tx);
    handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn reports_while_running_never_mismatch_status_and_exception() {
    let registry = Arc::new(TaskRegistry::new());
    let flip = Arc::new(AtomicUsize::new(0));
    {
        let flip = Arc::clone(&flip);
        registry.add_fixed_rate_task("flaky", Duration::from_millis(1), Duration::ZERO, move || {
            if flip.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
                Ok(())
            } else {
                Err(TaskFailure::new("Flaky", "odd run"))
            }
        });
    }

    let (tx, rx) = watch::channel(false);
    let handle = tokio::spawn(Runtime::new(Arc::clone(&registry), SystemClock).run(rx));

    let reporter = ScheduledTasksReporter::for_holder(registry);
    let reader = tokio::task::spawn_blocking(move || {
        let deadline = std::time::Instant::now() + Duration::from_millis(200);
        while std::time::Instant::now() < deadline {
            let snapshot = reporter.report();
            if let Some(last) = &snapshot.fixed_rate[0].last_execution {
                assert_eq!(
                    last.exception().is_some(),
                    last.status() == ExecutionStatus::Error
                );
            }
        }
    });

    reader.await.unwrap();
    tx.send(true).unwrap();
    handle.await.unwrap().unwrap();
    assert!(flip.load(Ordering::SeqCst) >= 2);
}
