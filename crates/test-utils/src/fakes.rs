use std::collections::VecDeque;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use startafter::exec::{CommandLine, LaunchError, LaunchResult, Launcher};
use startafter::types::WaitKind;
use startafter::wait::{ConditionProbe, WaitObserver};

/// A probe that answers from a script instead of looking at the system.
///
/// Clones share the script and the call log, so a test can keep one clone
/// and hand another to the code under test.
#[derive(Clone)]
pub struct ScriptedProbe {
    state: Arc<Mutex<ProbeState>>,
    delay: Option<Duration>,
}

struct ProbeState {
    script: VecDeque<bool>,
    /// Answer once the script is exhausted.
    fallback: bool,
    calls: Vec<(WaitKind, String)>,
}

impl ScriptedProbe {
    /// Fails `n - 1` times, then succeeds on check `n` and every check after.
    pub fn satisfied_after(n: usize) -> Self {
        assert!(n >= 1, "a condition is met on check 1 at the earliest");
        Self::from_script(vec![false; n - 1], true)
    }

    /// Never satisfied.
    pub fn never() -> Self {
        Self::from_script(Vec::new(), false)
    }

    pub fn from_script(script: Vec<bool>, fallback: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(ProbeState {
                script: script.into(),
                fallback,
                calls: Vec::new(),
            })),
            delay: None,
        }
    }

    /// Make every check take `delay` (tokio time) before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<(WaitKind, String)> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn check_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }
}

impl ConditionProbe for ScriptedProbe {
    fn check<'a>(
        &'a self,
        kind: WaitKind,
        target: &'a str,
    ) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>> {
        Box::pin(async move {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let mut state = self.state.lock().unwrap();
            state.calls.push((kind, target.to_string()));
            let fallback = state.fallback;
            state.script.pop_front().unwrap_or(fallback)
        })
    }
}

/// Everything a `WaitObserver` can be told.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitEvent {
    Checked {
        attempt: u64,
        kind: WaitKind,
        target: String,
        satisfied: bool,
    },
    Slept {
        attempt: u64,
        interval: Duration,
    },
    Ready {
        checks: u64,
    },
    Cancelled {
        checks: u64,
    },
}

/// Observer that records events in order.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<WaitEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<WaitEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn checks(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, WaitEvent::Checked { .. }))
            .count()
    }

    /// Intervals of every sleep, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.events()
            .iter()
            .filter_map(|e| match e {
                WaitEvent::Slept { interval, .. } => Some(*interval),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: WaitEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl WaitObserver for RecordingObserver {
    fn on_check(&self, attempt: u64, kind: WaitKind, target: &str, satisfied: bool) {
        self.push(WaitEvent::Checked {
            attempt,
            kind,
            target: target.to_string(),
            satisfied,
        });
    }

    fn on_sleep(&self, attempt: u64, interval: Duration) {
        self.push(WaitEvent::Slept { attempt, interval });
    }

    fn on_ready(&self, checks: u64) {
        self.push(WaitEvent::Ready { checks });
    }

    fn on_cancelled(&self, checks: u64) {
        self.push(WaitEvent::Cancelled { checks });
    }
}

/// A launcher that records what it was asked to start instead of starting it.
#[derive(Clone)]
pub struct RecordingLauncher {
    launched: Arc<Mutex<Vec<CommandLine>>>,
    /// `Some(pid)` reports success, `None` reports a "not found" spawn error.
    pid: Option<u32>,
}

impl RecordingLauncher {
    pub fn succeeding(pid: u32) -> Self {
        Self {
            launched: Arc::new(Mutex::new(Vec::new())),
            pid: Some(pid),
        }
    }

    pub fn failing() -> Self {
        Self {
            launched: Arc::new(Mutex::new(Vec::new())),
            pid: None,
        }
    }

    pub fn launched(&self) -> Vec<CommandLine> {
        self.launched.lock().unwrap().clone()
    }
}

impl Launcher for RecordingLauncher {
    fn spawn(&self, command: &CommandLine) -> LaunchResult {
        self.launched.lock().unwrap().push(command.clone());
        match self.pid {
            Some(pid) => LaunchResult::spawned(pid),
            None => LaunchResult::failed(LaunchError::Spawn {
                program: command.program.clone(),
                source: io::Error::new(io::ErrorKind::NotFound, "program not found"),
            }),
        }
    }
}
