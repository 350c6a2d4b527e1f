// src/wait/observer.rs

//! Observer hooks for the wait loop.

use std::time::Duration;

use tracing::info;

use crate::types::WaitKind;

/// Receives one callback per loop event.
///
/// Only `on_check` is required; the rest default to no-ops.
pub trait WaitObserver: Send + Sync {
    /// A probe returned. `attempt` counts from 1.
    fn on_check(&self, attempt: u64, kind: WaitKind, target: &str, satisfied: bool);

    /// The loop is about to sleep after a failed `attempt`.
    fn on_sleep(&self, _attempt: u64, _interval: Duration) {}

    /// The condition was met after `checks` probes.
    fn on_ready(&self, _checks: u64) {}

    /// Cancellation was observed after `checks` completed probes.
    fn on_cancelled(&self, _checks: u64) {}
}

/// Default observer: one `info` line per check via `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl WaitObserver for TracingObserver {
    fn on_check(&self, attempt: u64, kind: WaitKind, target: &str, satisfied: bool) {
        info!(attempt, %kind, target, satisfied, "checked condition");
    }

    fn on_sleep(&self, attempt: u64, interval: Duration) {
        info!(
            attempt,
            interval_secs = interval.as_secs_f64(),
            "condition not met; waiting"
        );
    }

    fn on_ready(&self, checks: u64) {
        info!(checks, "condition met");
    }

    fn on_cancelled(&self, checks: u64) {
        info!(checks, "wait cancelled");
    }
}
