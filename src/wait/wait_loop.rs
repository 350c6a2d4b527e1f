// src/wait/wait_loop.rs

//! The polling loop.

use std::fmt;

use crate::cancel::CancellationToken;
use crate::types::WaitSpec;

use super::observer::WaitObserver;
use super::probe::ConditionProbe;

/// How a wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The last of `checks` probes reported the condition as met.
    Satisfied { checks: u64 },
    /// Cancellation arrived after `checks` completed probes.
    Cancelled { checks: u64 },
}

/// Polls a [`ConditionProbe`] at a fixed interval until it reports `true` or
/// the cancellation token fires.
///
/// There is no iteration limit and no backoff: the gap between two checks is
/// always `spec.interval()`.
pub struct WaitLoop<P, O> {
    probe: P,
    observer: O,
    cancel: CancellationToken,
}

impl<P, O> fmt::Debug for WaitLoop<P, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WaitLoop")
            .field("cancel", &self.cancel)
            .finish_non_exhaustive()
    }
}

impl<P: ConditionProbe, O: WaitObserver> WaitLoop<P, O> {
    pub fn new(probe: P, observer: O, cancel: CancellationToken) -> Self {
        Self {
            probe,
            observer,
            cancel,
        }
    }

    /// Check, sleep, repeat.
    ///
    /// Cancellation is honoured before each check, while a probe is in
    /// flight and during the sleep.
    pub async fn wait(&self, spec: &WaitSpec) -> WaitOutcome {
        let mut checks = 0u64;

        loop {
            if self.cancel.is_cancelled() {
                return self.cancelled(checks);
            }

            let satisfied = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return self.cancelled(checks),
                satisfied = self.probe.check(spec.kind(), spec.target()) => satisfied,
            };

            checks += 1;
            self.observer.on_check(checks, spec.kind(), spec.target(), satisfied);

            if satisfied {
                self.observer.on_ready(checks);
                return WaitOutcome::Satisfied { checks };
            }

            self.observer.on_sleep(checks, spec.interval());
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return self.cancelled(checks),
                _ = tokio::time::sleep(spec.interval()) => {}
            }
        }
    }

    /// Wait, then call `on_ready` once. Returns `None` without calling it if
    /// the wait was cancelled.
    pub async fn run<F, T>(&self, spec: &WaitSpec, on_ready: F) -> Option<T>
    where
        F: FnOnce() -> T,
    {
        match self.wait(spec).await {
            WaitOutcome::Satisfied { .. } => Some(on_ready()),
            WaitOutcome::Cancelled { .. } => None,
        }
    }

    fn cancelled(&self, checks: u64) -> WaitOutcome {
        self.observer.on_cancelled(checks);
        WaitOutcome::Cancelled { checks }
    }
}
