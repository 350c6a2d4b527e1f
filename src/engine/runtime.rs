// src/engine/runtime.rs

use std::fmt;

use tracing::{debug, info};

use crate::cancel::CancellationToken;
use crate::errors::Result;
use crate::exec::{CommandLine, Launcher};
use crate::types::{CommandSpec, WaitSpec};
use crate::wait::{ConditionProbe, WaitLoop, WaitObserver, WaitOutcome};

/// Result of a completed `start_after` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// The condition was met after `checks` probes and `command` was started.
    Launched {
        command: CommandLine,
        pid: u32,
        checks: u64,
    },
    /// Cancelled before the condition was met; nothing was launched.
    Cancelled { checks: u64 },
}

/// Waits for a condition, then launches a command line exactly once.
///
/// The probe, observer and launcher are injected so the whole flow can run
/// against fakes in tests.
pub struct StartAfter<P, O, L> {
    wait_loop: WaitLoop<P, O>,
    launcher: L,
}

impl<P, O, L> fmt::Debug for StartAfter<P, O, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StartAfter")
            .field("wait_loop", &self.wait_loop)
            .finish_non_exhaustive()
    }
}

impl<P, O, L> StartAfter<P, O, L>
where
    P: ConditionProbe,
    O: WaitObserver,
    L: Launcher,
{
    pub fn new(probe: P, observer: O, launcher: L, cancel: CancellationToken) -> Self {
        Self {
            wait_loop: WaitLoop::new(probe, observer, cancel),
            launcher,
        }
    }

    /// Wait for `spec`, then launch `command`.
    ///
    /// - The command line is tokenized before the first check, so a
    ///   malformed one fails immediately with `StartAfterError::Tokenize`.
    /// - A launch failure after the condition was met is returned as
    ///   `StartAfterError::Launch` and is not retried.
    pub async fn start_after(
        &self,
        spec: &WaitSpec,
        command: &CommandSpec,
    ) -> Result<StartOutcome> {
        let parsed = command.parse()?;

        info!(
            kind = %spec.kind(),
            target = spec.target(),
            interval_secs = spec.interval().as_secs_f64(),
            program = %parsed.program,
            "waiting for condition before launch"
        );
        debug!(args = ?parsed.args, "parsed command line");

        match self.wait_loop.wait(spec).await {
            WaitOutcome::Cancelled { checks } => {
                info!(checks, "cancelled before the condition was met; not launching");
                Ok(StartOutcome::Cancelled { checks })
            }
            WaitOutcome::Satisfied { checks } => {
                let pid = self.launcher.spawn(&parsed).into_result()?;
                Ok(StartOutcome::Launched {
                    command: parsed,
                    pid,
                    checks,
                })
            }
        }
    }
}
