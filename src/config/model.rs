// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

use crate::types::{CommandSpec, WaitSpec};

/// Check interval used when neither the CLI nor the config file sets one.
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 5;
/// Smallest accepted check interval, in seconds.
pub const MIN_CHECK_INTERVAL_SECS: u64 = 1;
/// Largest accepted check interval, in seconds.
pub const MAX_CHECK_INTERVAL_SECS: u64 = 60;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [wait]
/// type = "UrlIsAccessible"
/// for = "http://localhost:8080/health"
/// check_interval_seconds = 5
///
/// [command]
/// line = "\"C:\\Program Files\\App\\app.exe\" --flag value"
/// ```
///
/// Every field is optional here: values missing from the file may still be
/// supplied on the command line. Whatever is still missing after merging is
/// reported by validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub wait: WaitSection,

    #[serde(default)]
    pub command: CommandSection,
}

/// `[wait]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaitSection {
    /// Condition kind, e.g. `"FolderExists"`. Parsed during validation so an
    /// unknown value is reported as such rather than as a TOML error.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    /// URL, folder path or process name.
    #[serde(default, rename = "for")]
    pub target: Option<String>,

    /// Seconds between checks; `1..=60`, default 5.
    #[serde(default)]
    pub check_interval_seconds: Option<u64>,
}

/// `[command]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandSection {
    /// Full command line: program followed by arguments.
    #[serde(default)]
    pub line: Option<String>,
}

/// Validated configuration, ready for the engine.
///
/// Built through `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub wait: WaitSpec,
    pub command: CommandSpec,
}

impl ResolvedConfig {
    pub fn check_interval(&self) -> Duration {
        self.wait.interval()
    }
}
