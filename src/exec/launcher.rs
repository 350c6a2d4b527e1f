// src/exec/launcher.rs

//! Detached process launcher.
//!
//! The program is started directly, never through a shell: each token from
//! the tokenizer becomes exactly one OS argument. Standard streams are
//! detached and the launcher does not wait for the child.

use std::io;
use std::process::{Child, Command, Stdio};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::tokenize::{CommandLine, TokenizeError};

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error(transparent)]
    Tokenize(#[from] TokenizeError),

    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Outcome of a single launch attempt.
#[derive(Debug)]
pub struct LaunchResult {
    outcome: Result<u32, LaunchError>,
}

impl LaunchResult {
    pub fn spawned(pid: u32) -> Self {
        Self { outcome: Ok(pid) }
    }

    pub fn failed(error: LaunchError) -> Self {
        Self {
            outcome: Err(error),
        }
    }

    pub fn is_started(&self) -> bool {
        self.outcome.is_ok()
    }

    /// OS process id of the started program.
    pub fn pid(&self) -> Option<u32> {
        self.outcome.as_ref().ok().copied()
    }

    pub fn error(&self) -> Option<&LaunchError> {
        self.outcome.as_ref().err()
    }

    pub fn into_result(self) -> Result<u32, LaunchError> {
        self.outcome
    }
}

/// Starts programs. Production code uses [`ProcessLauncher`]; tests swap in
/// a recording fake.
pub trait Launcher: Send + Sync {
    /// Start an already tokenized command line.
    fn spawn(&self, command: &CommandLine) -> LaunchResult;

    /// Tokenize `raw` and start it. Tokenization failures come back as
    /// [`LaunchError::Tokenize`] without anything being spawned.
    fn launch(&self, raw: &str) -> LaunchResult {
        match CommandLine::parse(raw) {
            Ok(command) => self.spawn(&command),
            Err(err) => LaunchResult::failed(err.into()),
        }
    }
}

/// Launcher backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn spawn(&self, command: &CommandLine) -> LaunchResult {
        info!(
            program = %command.program,
            args = ?command.args,
            "launching process"
        );

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        detach(&mut cmd);

        match cmd.spawn() {
            Ok(child) => {
                let pid = child.id();
                info!(program = %command.program, pid, "process started");
                reap_in_background(child, command.program.clone());
                LaunchResult::spawned(pid)
            }
            Err(source) => {
                warn!(
                    program = %command.program,
                    error = %source,
                    "process failed to start"
                );
                LaunchResult::failed(LaunchError::Spawn {
                    program: command.program.clone(),
                    source,
                })
            }
        }
    }
}

/// Put the child in its own process group so terminal signals aimed at us
/// do not reach it.
#[cfg(unix)]
fn detach(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;
    cmd.process_group(0);
}

/// Give the child its own console window and process group.
#[cfg(windows)]
fn detach(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;
    const CREATE_NEW_CONSOLE: u32 = 0x0000_0010;
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    cmd.creation_flags(CREATE_NEW_CONSOLE | CREATE_NEW_PROCESS_GROUP);
}

#[cfg(not(any(unix, windows)))]
fn detach(_cmd: &mut Command) {}

/// Collect the child's exit status off-thread so it does not linger as a
/// zombie while we are still running.
fn reap_in_background(mut child: Child, program: String) {
    let spawned = std::thread::Builder::new()
        .name("startafter-reaper".to_string())
        .spawn(move || match child.wait() {
            Ok(status) => debug!(program = %program, %status, "launched process exited"),
            Err(e) => debug!(program = %program, error = %e, "could not wait for launched process"),
        });

    if let Err(e) = spawned {
        debug!(error = %e, "could not start reaper thread");
    }
}
