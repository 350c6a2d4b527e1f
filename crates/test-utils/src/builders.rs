#![allow(dead_code)]

use std::time::Duration;

use startafter::cli::CliArgs;
use startafter::types::{CommandSpec, WaitKind, WaitSpec};

/// Build a `WaitSpec`, panicking on invalid input.
pub fn wait_spec(kind: WaitKind, target: &str, interval: Duration) -> WaitSpec {
    WaitSpec::new(kind, target, interval).expect("valid wait spec")
}

/// Build a `CommandSpec`, panicking on an empty command line.
pub fn command(raw: &str) -> CommandSpec {
    CommandSpec::new(raw).expect("valid command spec")
}

/// Builder for `CliArgs` to simplify config-resolution tests.
pub struct CliArgsBuilder {
    args: CliArgs,
}

impl CliArgsBuilder {
    pub fn new() -> Self {
        Self {
            args: CliArgs {
                wait_type: None,
                wait_for: None,
                command_line: None,
                check_interval_seconds: None,
                config: None,
                log_level: None,
                dry_run: false,
            },
        }
    }

    pub fn wait_type(mut self, kind: &str) -> Self {
        self.args.wait_type = Some(kind.to_string());
        self
    }

    pub fn wait_for(mut self, target: &str) -> Self {
        self.args.wait_for = Some(target.to_string());
        self
    }

    pub fn command_line(mut self, line: &str) -> Self {
        self.args.command_line = Some(line.to_string());
        self
    }

    pub fn check_interval_seconds(mut self, seconds: u64) -> Self {
        self.args.check_interval_seconds = Some(seconds);
        self
    }

    pub fn config(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.args.config = Some(path.into());
        self
    }

    pub fn dry_run(mut self, val: bool) -> Self {
        self.args.dry_run = val;
        self
    }

    pub fn build(self) -> CliArgs {
        self.args
    }
}

impl Default for CliArgsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
