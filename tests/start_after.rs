// tests/start_after.rs

mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::time::Duration;

use startafter::cancel::CancellationToken;
use startafter::engine::{StartAfter, StartOutcome};
use startafter::errors::{EXIT_LAUNCH, EXIT_TOKENIZE, StartAfterError};
use startafter::exec::{CommandLine, LaunchError, TokenizeError};
use startafter::types::WaitKind;
use startafter_test_utils::builders::{command, wait_spec};
use startafter_test_utils::fakes::{RecordingLauncher, RecordingObserver, ScriptedProbe};

type TestResult = Result<(), Box<dyn Error>>;

const INTERVAL: Duration = Duration::from_secs(5);

#[tokio::test(start_paused = true)]
async fn launches_once_after_condition_is_met() -> TestResult {
    init_tracing();

    let probe = ScriptedProbe::satisfied_after(3);
    let observer = RecordingObserver::new();
    let launcher = RecordingLauncher::succeeding(4242);
    let runner = StartAfter::new(
        probe.clone(),
        observer.clone(),
        launcher.clone(),
        CancellationToken::new(),
    );

    let spec = wait_spec(WaitKind::UrlIsAccessible, "http://localhost:8080/health", INTERVAL);
    let cmd = command(r#""C:\Program Files\App\app.exe" --flag value ; started by ops"#);

    let outcome = runner.start_after(&spec, &cmd).await?;

    let expected = CommandLine {
        program: r"C:\Program Files\App\app.exe".to_string(),
        args: vec!["--flag".to_string(), "value".to_string()],
    };
    assert_eq!(
        outcome,
        StartOutcome::Launched {
            command: expected.clone(),
            pid: 4242,
            checks: 3,
        }
    );
    assert_eq!(launcher.launched(), vec![expected]);
    assert_eq!(probe.check_count(), 3);
    assert_eq!(observer.sleeps().len(), 2);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn first_check_success_launches_without_sleeping() -> TestResult {
    let observer = RecordingObserver::new();
    let launcher = RecordingLauncher::succeeding(1);
    let runner = StartAfter::new(
        ScriptedProbe::satisfied_after(1),
        observer.clone(),
        launcher.clone(),
        CancellationToken::new(),
    );

    let outcome = runner
        .start_after(
            &wait_spec(WaitKind::FolderExists, "/var/lib/app", INTERVAL),
            &command("notepad.exe"),
        )
        .await?;

    assert!(matches!(outcome, StartOutcome::Launched { checks: 1, .. }));
    assert_eq!(observer.checks(), 1);
    assert!(observer.sleeps().is_empty());
    assert_eq!(launcher.launched().len(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn malformed_command_line_fails_before_any_check() {
    let probe = ScriptedProbe::satisfied_after(1);
    let launcher = RecordingLauncher::succeeding(1);
    let runner = StartAfter::new(
        probe.clone(),
        RecordingObserver::new(),
        launcher.clone(),
        CancellationToken::new(),
    );

    let err = runner
        .start_after(
            &wait_spec(WaitKind::FolderExists, "/tmp", INTERVAL),
            &command(r#""C:\Program Files\App\app.exe --flag"#),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StartAfterError::Tokenize(TokenizeError::UnterminatedQuote { quote: '"', .. })
    ));
    assert_eq!(err.exit_code(), EXIT_TOKENIZE);
    assert_eq!(probe.check_count(), 0);
    assert!(launcher.launched().is_empty());
}

#[tokio::test(start_paused = true)]
async fn comment_only_command_line_is_a_tokenization_error() {
    let probe = ScriptedProbe::satisfied_after(1);
    let runner = StartAfter::new(
        probe.clone(),
        RecordingObserver::new(),
        RecordingLauncher::succeeding(1),
        CancellationToken::new(),
    );

    let err = runner
        .start_after(
            &wait_spec(WaitKind::FolderExists, "/tmp", INTERVAL),
            &command("; nothing to run"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, StartAfterError::Tokenize(TokenizeError::Empty)));
    assert_eq!(probe.check_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn launch_failure_after_condition_is_surfaced_and_not_retried() {
    let probe = ScriptedProbe::satisfied_after(2);
    let launcher = RecordingLauncher::failing();
    let runner = StartAfter::new(
        probe.clone(),
        RecordingObserver::new(),
        launcher.clone(),
        CancellationToken::new(),
    );

    let err = runner
        .start_after(
            &wait_spec(WaitKind::ProcessExists, "sshd", INTERVAL),
            &command("missing-program --now"),
        )
        .await
        .unwrap_err();

    match &err {
        StartAfterError::Launch(LaunchError::Spawn { program, .. }) => {
            assert_eq!(program, "missing-program");
        }
        other => panic!("expected launch error, got {other:?}"),
    }
    assert_eq!(err.exit_code(), EXIT_LAUNCH);
    assert_eq!(launcher.launched().len(), 1);
    assert_eq!(probe.check_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn cancellation_means_nothing_is_launched() -> TestResult {
    let cancel = CancellationToken::new();
    let launcher = RecordingLauncher::succeeding(1);
    let runner = StartAfter::new(
        ScriptedProbe::never(),
        RecordingObserver::new(),
        launcher.clone(),
        cancel.clone(),
    );

    tokio::spawn(async move {
        tokio::time::sleep(INTERVAL * 2 + Duration::from_secs(1)).await;
        cancel.cancel();
    });

    let outcome = runner
        .start_after(
            &wait_spec(WaitKind::UrlIsAccessible, "http://localhost:1/", INTERVAL),
            &command("app.exe"),
        )
        .await?;

    assert_eq!(outcome, StartOutcome::Cancelled { checks: 3 });
    assert!(launcher.launched().is_empty());
    Ok(())
}
