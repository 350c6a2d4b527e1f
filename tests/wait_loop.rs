// tests/wait_loop.rs

mod common;
use crate::common::init_tracing;

use std::time::Duration;

use tokio::time::Instant;

use startafter::cancel::CancellationToken;
use startafter::types::WaitKind;
use startafter::wait::{WaitLoop, WaitOutcome};
use startafter_test_utils::builders::wait_spec;
use startafter_test_utils::fakes::{RecordingObserver, ScriptedProbe, WaitEvent};

const INTERVAL: Duration = Duration::from_secs(5);

#[tokio::test(start_paused = true)]
async fn already_true_condition_checks_once_and_never_sleeps() {
    init_tracing();

    let probe = ScriptedProbe::satisfied_after(1);
    let observer = RecordingObserver::new();
    let wait_loop = WaitLoop::new(probe.clone(), observer.clone(), CancellationToken::new());
    let spec = wait_spec(WaitKind::FolderExists, "/srv/data", INTERVAL);

    let started = Instant::now();
    let outcome = wait_loop.wait(&spec).await;

    assert_eq!(outcome, WaitOutcome::Satisfied { checks: 1 });
    assert_eq!(probe.check_count(), 1);
    assert!(observer.sleeps().is_empty());
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn condition_met_on_check_n_sleeps_n_minus_one_times() {
    init_tracing();

    for n in [2usize, 3, 7] {
        let probe = ScriptedProbe::satisfied_after(n);
        let observer = RecordingObserver::new();
        let wait_loop = WaitLoop::new(probe.clone(), observer.clone(), CancellationToken::new());
        let spec = wait_spec(WaitKind::UrlIsAccessible, "http://localhost/", INTERVAL);

        let started = Instant::now();
        let outcome = wait_loop.wait(&spec).await;

        assert_eq!(outcome, WaitOutcome::Satisfied { checks: n as u64 });
        assert_eq!(probe.check_count(), n);
        assert_eq!(observer.sleeps(), vec![INTERVAL; n - 1]);
        assert_eq!(started.elapsed(), INTERVAL * (n as u32 - 1));
    }
}

#[tokio::test(start_paused = true)]
async fn every_check_uses_the_spec_kind_and_target() {
    let probe = ScriptedProbe::satisfied_after(3);
    let wait_loop = WaitLoop::new(
        probe.clone(),
        RecordingObserver::new(),
        CancellationToken::new(),
    );
    let spec = wait_spec(WaitKind::ProcessExists, "postgres", Duration::from_secs(1));

    wait_loop.wait(&spec).await;

    assert_eq!(
        probe.calls(),
        vec![(WaitKind::ProcessExists, "postgres".to_string()); 3]
    );
}

#[tokio::test(start_paused = true)]
async fn observer_sees_checks_sleeps_and_readiness_in_order() {
    let observer = RecordingObserver::new();
    let wait_loop = WaitLoop::new(
        ScriptedProbe::satisfied_after(2),
        observer.clone(),
        CancellationToken::new(),
    );
    let spec = wait_spec(WaitKind::FolderExists, "/mnt/backup", INTERVAL);

    wait_loop.wait(&spec).await;

    assert_eq!(
        observer.events(),
        vec![
            WaitEvent::Checked {
                attempt: 1,
                kind: WaitKind::FolderExists,
                target: "/mnt/backup".to_string(),
                satisfied: false,
            },
            WaitEvent::Slept {
                attempt: 1,
                interval: INTERVAL,
            },
            WaitEvent::Checked {
                attempt: 2,
                kind: WaitKind::FolderExists,
                target: "/mnt/backup".to_string(),
                satisfied: true,
            },
            WaitEvent::Ready { checks: 2 },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn cancelled_before_first_check_probes_nothing() {
    let probe = ScriptedProbe::satisfied_after(1);
    let observer = RecordingObserver::new();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let wait_loop = WaitLoop::new(probe.clone(), observer.clone(), cancel);
    let spec = wait_spec(WaitKind::FolderExists, "/tmp", INTERVAL);

    assert_eq!(wait_loop.wait(&spec).await, WaitOutcome::Cancelled { checks: 0 });
    assert_eq!(probe.check_count(), 0);
    assert_eq!(observer.events(), vec![WaitEvent::Cancelled { checks: 0 }]);
}

#[tokio::test(start_paused = true)]
async fn cancellation_during_sleep_returns_without_waiting_out_the_interval() {
    init_tracing();

    let probe = ScriptedProbe::never();
    let cancel = CancellationToken::new();
    let wait_loop = WaitLoop::new(probe.clone(), RecordingObserver::new(), cancel.clone());
    let spec = wait_spec(WaitKind::ProcessExists, "never-running", Duration::from_secs(60));

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(90)).await;
        cancel.cancel();
    });

    let started = Instant::now();
    let outcome = wait_loop.wait(&spec).await;
    canceller.await.unwrap();

    // Checks at t=0 and t=60; cancelled halfway through the second sleep.
    assert_eq!(outcome, WaitOutcome::Cancelled { checks: 2 });
    assert_eq!(probe.check_count(), 2);
    assert_eq!(started.elapsed(), Duration::from_secs(90));
}

#[tokio::test(start_paused = true)]
async fn cancellation_interrupts_a_slow_probe() {
    let probe = ScriptedProbe::satisfied_after(1).with_delay(Duration::from_secs(10));
    let cancel = CancellationToken::new();
    let wait_loop = WaitLoop::new(probe.clone(), RecordingObserver::new(), cancel.clone());
    let spec = wait_spec(WaitKind::UrlIsAccessible, "http://slow.example/", INTERVAL);

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(3)).await;
        cancel.cancel();
    });

    assert_eq!(wait_loop.wait(&spec).await, WaitOutcome::Cancelled { checks: 0 });
    assert_eq!(probe.check_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn run_invokes_on_ready_exactly_once_after_success() {
    let wait_loop = WaitLoop::new(
        ScriptedProbe::satisfied_after(4),
        RecordingObserver::new(),
        CancellationToken::new(),
    );
    let spec = wait_spec(WaitKind::FolderExists, "/data", INTERVAL);

    let mut calls = 0;
    let result = wait_loop
        .run(&spec, || {
            calls += 1;
            "launched"
        })
        .await;

    assert_eq!(result, Some("launched"));
    assert_eq!(calls, 1);
}

#[tokio::test(start_paused = true)]
async fn run_skips_on_ready_when_cancelled() {
    let cancel = CancellationToken::new();
    let wait_loop = WaitLoop::new(
        ScriptedProbe::never(),
        RecordingObserver::new(),
        cancel.clone(),
    );
    let spec = wait_spec(WaitKind::FolderExists, "/data", INTERVAL);

    tokio::spawn(async move {
        tokio::time::sleep(INTERVAL * 3).await;
        cancel.cancel();
    });

    let mut called = false;
    let result = wait_loop.run(&spec, || called = true).await;

    assert_eq!(result, None);
    assert!(!called);
}
