// src/config/validate.rs

use std::str::FromStr;
use std::time::Duration;

use crate::config::model::{
    DEFAULT_CHECK_INTERVAL_SECS, MAX_CHECK_INTERVAL_SECS, MIN_CHECK_INTERVAL_SECS, RawConfigFile,
    ResolvedConfig,
};
use crate::errors::{Result, StartAfterError};
use crate::types::{CommandSpec, WaitKind, WaitSpec};

impl TryFrom<RawConfigFile> for ResolvedConfig {
    type Error = StartAfterError;

    /// Checks, in order:
    /// - the wait type is present and known,
    /// - the wait target is present and non-blank,
    /// - the check interval is within `1..=60` seconds,
    /// - the command line is present and non-blank.
    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let kind = WaitKind::from_str(&require(raw.wait.kind, "wait type", "[wait].type")?)?;
        let target = require(raw.wait.target, "wait target", "[wait].for")?;
        let interval = check_interval(raw.wait.check_interval_seconds)?;
        let line = require(raw.command.line, "command line", "[command].line")?;

        Ok(ResolvedConfig {
            wait: WaitSpec::new(kind, target, interval)?,
            command: CommandSpec::new(line)?,
        })
    }
}

fn require(value: Option<String>, what: &str, key: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(StartAfterError::ConfigError(format!("{what} must not be empty"))),
        None => Err(StartAfterError::ConfigError(format!(
            "missing {what} (set {key} in the config file or pass it on the command line)"
        ))),
    }
}

/// Resolve the interval, applying the default when unset.
pub fn check_interval(seconds: Option<u64>) -> Result<Duration> {
    let seconds = seconds.unwrap_or(DEFAULT_CHECK_INTERVAL_SECS);
    if !(MIN_CHECK_INTERVAL_SECS..=MAX_CHECK_INTERVAL_SECS).contains(&seconds) {
        return Err(StartAfterError::ConfigError(format!(
            "check interval must be between {MIN_CHECK_INTERVAL_SECS} and \
             {MAX_CHECK_INTERVAL_SECS} seconds (got {seconds})"
        )));
    }
    Ok(Duration::from_secs(seconds))
}
