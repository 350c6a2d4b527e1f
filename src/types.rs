// src/types.rs

//! Validated value types shared by the wait loop, the launcher and the CLI.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::{Result, StartAfterError};
use crate::exec::{CommandLine, TokenizeError};

/// The closed set of conditions `startafter` knows how to wait for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaitKind {
    /// An HTTP GET against the target answers with status 200.
    UrlIsAccessible,
    /// The target path exists and is a directory.
    FolderExists,
    /// A running process has exactly the target name.
    ProcessExists,
}

impl WaitKind {
    pub const ALL: [WaitKind; 3] = [
        WaitKind::UrlIsAccessible,
        WaitKind::FolderExists,
        WaitKind::ProcessExists,
    ];

    /// Canonical spelling, as accepted by `--wait-type`.
    pub fn as_str(self) -> &'static str {
        match self {
            WaitKind::UrlIsAccessible => "UrlIsAccessible",
            WaitKind::FolderExists => "FolderExists",
            WaitKind::ProcessExists => "ProcessExists",
        }
    }
}

impl fmt::Display for WaitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaitKind {
    type Err = StartAfterError;

    /// Case-insensitive; `-` and `_` separators are ignored, so
    /// `UrlIsAccessible`, `url-is-accessible` and `url_is_accessible` are the
    /// same kind.
    fn from_str(s: &str) -> Result<Self> {
        let normalised: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();

        match normalised.as_str() {
            "urlisaccessible" | "urlreachable" | "url" => Ok(WaitKind::UrlIsAccessible),
            "folderexists" | "folder" => Ok(WaitKind::FolderExists),
            "processexists" | "process" => Ok(WaitKind::ProcessExists),
            _ => Err(StartAfterError::UnknownWaitType(s.trim().to_string())),
        }
    }
}

/// What to wait for and how often to look.
///
/// Only constructible through [`WaitSpec::new`], so a value in hand always has
/// a non-blank target and a non-zero interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitSpec {
    kind: WaitKind,
    target: String,
    interval: Duration,
}

impl WaitSpec {
    pub fn new(kind: WaitKind, target: impl Into<String>, interval: Duration) -> Result<Self> {
        let target = target.into();
        if target.trim().is_empty() {
            return Err(StartAfterError::InvalidWaitSpec(format!(
                "{kind} needs a non-empty wait target"
            )));
        }
        if interval.is_zero() {
            return Err(StartAfterError::InvalidWaitSpec(
                "check interval must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            kind,
            target,
            interval,
        })
    }

    pub fn kind(&self) -> WaitKind {
        self.kind
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// A raw, not yet tokenized command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    raw: String,
}

impl CommandSpec {
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(StartAfterError::InvalidCommand(
                "command line must not be empty".to_string(),
            ));
        }
        Ok(Self { raw })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Tokenize into program + arguments. The result is not cached.
    pub fn parse(&self) -> std::result::Result<CommandLine, TokenizeError> {
        CommandLine::parse(&self.raw)
    }
}
