// src/config/mod.rs

//! Configuration loading and validation.
//!
//! - `model.rs`: the TOML-backed data model and the validated form.
//! - `loader.rs`: reading the file and merging CLI overrides.
//! - `validate.rs`: turning a raw config into a `ResolvedConfig`.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_from_path, merge_cli_overrides, resolve};
pub use model::{
    CommandSection, DEFAULT_CHECK_INTERVAL_SECS, MAX_CHECK_INTERVAL_SECS, MIN_CHECK_INTERVAL_SECS,
    RawConfigFile, ResolvedConfig, WaitSection,
};
pub use validate::check_interval;
