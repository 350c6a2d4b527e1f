// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::cli::CliArgs;
use crate::config::model::{RawConfigFile, ResolvedConfig};
use crate::errors::{Result, StartAfterError};

/// Read and deserialize a TOML config file. No semantic validation.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        StartAfterError::ConfigError(format!("reading config file at {}: {e}", path.display()))
    })?;

    let config: RawConfigFile = toml::from_str(&contents)?;
    Ok(config)
}

/// Overlay command-line values on top of a raw config. CLI values win.
pub fn merge_cli_overrides(mut raw: RawConfigFile, args: &CliArgs) -> RawConfigFile {
    if let Some(kind) = &args.wait_type {
        raw.wait.kind = Some(kind.clone());
    }
    if let Some(target) = &args.wait_for {
        raw.wait.target = Some(target.clone());
    }
    if let Some(seconds) = args.check_interval_seconds {
        raw.wait.check_interval_seconds = Some(seconds);
    }
    if let Some(line) = &args.command_line {
        raw.command.line = Some(line.clone());
    }
    raw
}

/// Build the validated configuration for a run.
///
/// - Loads `--config` if given, otherwise starts from an empty config.
/// - Applies CLI overrides.
/// - Validates the merged result.
pub fn resolve(args: &CliArgs) -> Result<ResolvedConfig> {
    let raw = match &args.config {
        Some(path) => load_from_path(path)?,
        None => RawConfigFile::default(),
    };
    ResolvedConfig::try_from(merge_cli_overrides(raw, args))
}
