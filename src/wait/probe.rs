// src/wait/probe.rs

//! Condition probes.
//!
//! A probe answers one question, once: is the condition met right now?
//! Expected failures (network errors, missing paths, absent processes) are
//! answered with `false` and logged at debug level; they never abort the
//! wait loop.

use std::borrow::Cow;
use std::ffi::OsString;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::time::Duration;

use anyhow::Context;
use reqwest::StatusCode;
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};
use tracing::debug;

use crate::errors::Result;
use crate::types::WaitKind;

/// Timeout applied to each URL probe request.
pub const URL_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Trait abstracting a single condition check.
///
/// Production code uses [`SystemProbe`]; tests provide scripted fakes.
pub trait ConditionProbe: Send + Sync {
    fn check<'a>(
        &'a self,
        kind: WaitKind,
        target: &'a str,
    ) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>>;
}

/// Probe backed by the real network, filesystem and process table.
#[derive(Debug, Clone)]
pub struct SystemProbe {
    http: reqwest::Client,
}

impl SystemProbe {
    /// Probe with the default [`URL_PROBE_TIMEOUT`].
    pub fn new() -> Result<Self> {
        Self::with_timeout(URL_PROBE_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building HTTP client for URL probes")?;
        Ok(Self::with_client(http))
    }

    /// Use a caller-configured HTTP client (proxy settings, TLS roots, ...).
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// True iff a GET on `url` ends with status 200, after redirects.
    pub async fn url_is_accessible(&self, url: &str) -> bool {
        match self.http.get(url).send().await {
            Ok(response) if response.status() == StatusCode::OK => true,
            Ok(response) => {
                debug!(url, status = %response.status(), "URL probe: not 200");
                false
            }
            Err(err) => {
                debug!(url, error = %err, "URL probe: request failed");
                false
            }
        }
    }
}

impl ConditionProbe for SystemProbe {
    fn check<'a>(
        &'a self,
        kind: WaitKind,
        target: &'a str,
    ) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>> {
        Box::pin(async move {
            match kind {
                WaitKind::UrlIsAccessible => self.url_is_accessible(target).await,
                WaitKind::FolderExists => folder_exists(target).await,
                WaitKind::ProcessExists => process_exists(target).await,
            }
        })
    }
}

/// True iff `path` exists and is a directory.
pub async fn folder_exists(path: &str) -> bool {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => true,
        Ok(_) => {
            debug!(path, "folder probe: path exists but is not a directory");
            false
        }
        Err(err) => {
            debug!(path, error = %err, "folder probe: cannot stat path");
            false
        }
    }
}

/// True iff a running process is named exactly `name`.
///
/// Process enumeration is synchronous, so it runs on the blocking pool.
pub async fn process_exists(name: &str) -> bool {
    let target = name.to_string();
    match tokio::task::spawn_blocking(move || any_process_named(&target)).await {
        Ok(found) => found,
        Err(err) => {
            debug!(name, error = %err, "process probe: enumeration task failed");
            false
        }
    }
}

fn any_process_named(target: &str) -> bool {
    let mut sys = System::new();
    sys.refresh_processes_specifics(
        ProcessesToUpdate::All,
        true,
        ProcessRefreshKind::nothing()
            .with_exe(UpdateKind::OnlyIfNotSet)
            .with_cmd(UpdateKind::OnlyIfNotSet),
    );

    let found = sys.processes().values().any(|process| {
        let short = process.name().to_string_lossy();
        let name = full_process_name(&short, process.cmd().first(), process.exe());
        process_name_matches(&name, target)
    });

    if !found {
        debug!(
            name = target,
            scanned = sys.processes().len(),
            "process probe: no process with that name"
        );
    }
    found
}

/// Linux reports at most this many bytes of a process name (`comm`).
const KERNEL_NAME_LIMIT: usize = 15;

/// Undo the kernel's truncation of long process names.
///
/// When `short` is exactly at the limit, the real name is taken from the
/// basename of `argv[0]` or of the executable path, whichever extends
/// `short`. Interpreters and renamed processes keep `short`.
pub fn full_process_name<'a>(
    short: &'a str,
    argv0: Option<&OsString>,
    exe: Option<&Path>,
) -> Cow<'a, str> {
    if short.len() != KERNEL_NAME_LIMIT {
        return Cow::Borrowed(short);
    }

    let argv0_name = argv0.and_then(|arg| Path::new(arg).file_name());
    let exe_name = exe.and_then(Path::file_name);

    argv0_name
        .into_iter()
        .chain(exe_name)
        .map(|candidate| candidate.to_string_lossy())
        .find(|candidate| candidate.len() > short.len() && candidate.starts_with(short))
        .map_or(Cow::Borrowed(short), |full| Cow::Owned(full.into_owned()))
}

/// Whole-name comparison between a running process and the wait target.
///
/// On Windows the match ignores ASCII case and a trailing `.exe` on either
/// side. Elsewhere it is an exact, case-sensitive comparison.
pub fn process_name_matches(candidate: &str, target: &str) -> bool {
    if cfg!(windows) {
        strip_exe_suffix(candidate).eq_ignore_ascii_case(strip_exe_suffix(target))
    } else {
        candidate == target
    }
}

fn strip_exe_suffix(name: &str) -> &str {
    let split = name.len().saturating_sub(4);
    match (name.get(..split), name.get(split..)) {
        (Some(stem), Some(ext)) if !stem.is_empty() && ext.eq_ignore_ascii_case(".exe") => stem,
        _ => name,
    }
}
