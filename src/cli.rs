// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `startafter`.
///
/// Every wait/command value may also come from `--config`; flags given here
/// take precedence over the file.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "startafter",
    version,
    about = "Wait until a URL answers, a folder exists or a process runs, then launch a command.",
    long_about = None
)]
pub struct CliArgs {
    /// Condition to wait for: UrlIsAccessible, FolderExists or ProcessExists.
    #[arg(long, alias = "WaitType", value_name = "KIND")]
    pub wait_type: Option<String>,

    /// URL, folder path or process name the condition is checked against.
    #[arg(long, alias = "WaitFor", value_name = "TARGET")]
    pub wait_for: Option<String>,

    /// Command line to launch once the condition holds.
    ///
    /// Quote it as a single argument; it is tokenized by startafter itself,
    /// not by a shell.
    #[arg(
        long,
        alias = "CommandLine",
        value_name = "CMD",
        allow_hyphen_values = true
    )]
    pub command_line: Option<String>,

    /// Seconds between checks (1-60). Default: 5.
    #[arg(
        long,
        alias = "CheckIntervalSeconds",
        value_name = "SECONDS",
        value_parser = clap::value_parser!(u64).range(1..=60)
    )]
    pub check_interval_seconds: Option<u64>,

    /// Optional TOML config file with `[wait]` and `[command]` sections.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `STARTAFTER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Validate and print what would happen, without waiting or launching.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
