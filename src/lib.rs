// src/lib.rs

pub mod cancel;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;
pub mod wait;

use tracing::{debug, info, warn};

use crate::cancel::CancellationToken;
use crate::cli::CliArgs;
use crate::config::{ResolvedConfig, resolve};
use crate::engine::{StartOutcome, start_after};
use crate::errors::{EXIT_CANCELLED, Result};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config resolution (file + CLI overrides)
/// - dry-run output
/// - Ctrl-C handling via a cancellation token
/// - the wait-then-launch engine
///
/// Returns the exit code for non-error outcomes: `0` once the command has
/// been launched (or after a dry run), `130` when cancelled.
pub async fn run(args: CliArgs) -> Result<i32> {
    let cfg = resolve(&args)?;

    if args.dry_run {
        print_dry_run(&cfg)?;
        return Ok(0);
    }

    // Ctrl-C → stop waiting, launch nothing.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for Ctrl+C");
                return;
            }
            cancel.cancel();
        });
    }

    match start_after(&cfg.wait, &cfg.command, cancel).await? {
        StartOutcome::Launched {
            command,
            pid,
            checks,
        } => {
            info!(program = %command.program, pid, checks, "launched");
            Ok(0)
        }
        StartOutcome::Cancelled { checks } => {
            info!(checks, "interrupted before the condition was met");
            Ok(EXIT_CANCELLED)
        }
    }
}

/// Print the resolved wait condition and the tokenized command line.
///
/// Tokenization errors are reported exactly as a real run would report them.
fn print_dry_run(cfg: &ResolvedConfig) -> Result<()> {
    let parsed = cfg.command.parse()?;

    println!("startafter dry-run");
    println!("  wait.type = {}", cfg.wait.kind());
    println!("  wait.for = {}", cfg.wait.target());
    println!(
        "  wait.check_interval_seconds = {}",
        cfg.check_interval().as_secs()
    );
    println!();
    println!("command:");
    println!("  raw: {}", cfg.command.raw());
    println!("  program: {}", parsed.program);
    for (i, arg) in parsed.args.iter().enumerate() {
        println!("  arg[{i}]: {arg}");
    }

    debug!("dry-run complete (no waiting, no launch)");
    Ok(())
}
