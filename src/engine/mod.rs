// src/engine/mod.rs

//! Orchestration: wait for a condition, then launch.
//!
//! [`StartAfter`] composes the wait loop with a launcher. The
//! [`start_after`] helper wires it to the production probe, observer and
//! launcher.

pub mod runtime;

pub use runtime::{StartAfter, StartOutcome};

use crate::cancel::CancellationToken;
use crate::errors::Result;
use crate::exec::ProcessLauncher;
use crate::types::{CommandSpec, WaitSpec};
use crate::wait::{SystemProbe, TracingObserver};

/// Wait for `spec` using the real system probes, then launch `command`
/// detached.
pub async fn start_after(
    spec: &WaitSpec,
    command: &CommandSpec,
    cancel: CancellationToken,
) -> Result<StartOutcome> {
    let runner = StartAfter::new(SystemProbe::new()?, TracingObserver, ProcessLauncher, cancel);
    runner.start_after(spec, command).await
}
