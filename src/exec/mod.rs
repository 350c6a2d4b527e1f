// src/exec/mod.rs

//! Process launching layer.
//!
//! - [`tokenize`] turns a raw command-line string into a [`CommandLine`].
//! - [`launcher`] provides the `Launcher` trait and the production
//!   `ProcessLauncher`, which starts the program detached.

pub mod launcher;
pub mod tokenize;

pub use launcher::{LaunchError, LaunchResult, Launcher, ProcessLauncher};
pub use tokenize::{CommandLine, TokenizeError, tokenize};
