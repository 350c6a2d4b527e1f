// src/wait/mod.rs

//! Waiting for a condition.
//!
//! - [`probe`] performs single checks against the network, filesystem or
//!   process table.
//! - [`observer`] receives loop events; the default logs through `tracing`.
//! - [`wait_loop`] repeats a probe at a fixed interval until it succeeds or is
//!   cancelled.

pub mod observer;
pub mod probe;
pub mod wait_loop;

pub use observer::{TracingObserver, WaitObserver};
pub use probe::{
    ConditionProbe, SystemProbe, URL_PROBE_TIMEOUT, full_process_name, process_name_matches,
};
pub use wait_loop::{WaitLoop, WaitOutcome};
