// src/errors.rs

//! Crate-wide error type and exit-code mapping.

use thiserror::Error;

use crate::exec::{LaunchError, TokenizeError};

/// Exit code for configuration and usage problems.
pub const EXIT_CONFIG: i32 = 2;
/// Exit code when the command line could not be tokenized.
pub const EXIT_TOKENIZE: i32 = 3;
/// Exit code when the condition was met but the program failed to start.
pub const EXIT_LAUNCH: i32 = 4;
/// Exit code when the wait was cancelled (Ctrl-C).
pub const EXIT_CANCELLED: i32 = 130;

#[derive(Error, Debug)]
pub enum StartAfterError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(
        "Unknown wait type: {0:?} (expected UrlIsAccessible, FolderExists or ProcessExists)"
    )]
    UnknownWaitType(String),

    #[error("Invalid wait spec: {0}")]
    InvalidWaitSpec(String),

    #[error("Invalid command line: {0}")]
    InvalidCommand(String),

    #[error("Cannot tokenize command line: {0}")]
    Tokenize(#[from] TokenizeError),

    #[error("Condition met but launch failed: {0}")]
    Launch(#[from] LaunchError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StartAfterError {
    /// Process exit code the CLI reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            StartAfterError::ConfigError(_)
            | StartAfterError::UnknownWaitType(_)
            | StartAfterError::InvalidWaitSpec(_)
            | StartAfterError::InvalidCommand(_)
            | StartAfterError::TomlError(_) => EXIT_CONFIG,
            StartAfterError::Tokenize(_) => EXIT_TOKENIZE,
            StartAfterError::Launch(LaunchError::Tokenize(_)) => EXIT_TOKENIZE,
            StartAfterError::Launch(_) => EXIT_LAUNCH,
            StartAfterError::IoError(_) | StartAfterError::Other(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, StartAfterError>;
