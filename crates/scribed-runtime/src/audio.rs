//! PulseAudio input source enumeration via `pactl`.
//!
//! Best-effort wrappers: a missing daemon, a missing `pactl` binary, or a
//! hung call all degrade to an empty listing / the "auto" placeholder
//! rather than an error.

use std::time::Duration;

use tokio::process::Command;
use tokio::time;
use tracing::debug;

/// How long a `pactl` invocation may take before being abandoned.
const PACTL_TIMEOUT: Duration = Duration::from_secs(5);

/// List capture source names, monitors filtered out.
pub async fn list_sources() -> Vec<String> {
    match pactl(&["list", "sources", "short"]).await {
        Some(out) => parse_sources(&out),
        None => Vec::new(),
    }
}

/// Resolve the default capture source name.
///
/// Falls back to the first non-monitor source, then the first source of
/// any kind, then the "auto" placeholder the worker understands.
pub async fn default_source() -> String {
    if let Some(out) = pactl(&["get-default-source"]).await {
        let name = out.trim();
        if !name.is_empty() {
            return name.to_string();
        }
    }
    if let Some(out) = pactl(&["list", "sources", "short"]).await {
        if let Some(name) = pick_default_source(&out) {
            return name;
        }
    }
    "auto".to_string()
}

/// Parse `pactl list sources short` output (tab-separated, name in the
/// second column) into non-monitor source names.
fn parse_sources(out: &str) -> Vec<String> {
    out.lines()
        .filter_map(|line| line.split('\t').nth(1))
        .filter(|name| !name.contains("monitor"))
        .map(str::to_string)
        .collect()
}

/// Pick a default from a source listing: first non-monitor entry, else
/// the first entry.
fn pick_default_source(out: &str) -> Option<String> {
    let mut first = None;
    for line in out.trim().lines() {
        if let Some(name) = line.split_whitespace().nth(1) {
            if first.is_none() {
                first = Some(name.to_string());
            }
            if !name.contains("monitor") {
                return Some(name.to_string());
            }
        }
    }
    first
}

async fn pactl(args: &[&str]) -> Option<String> {
    match time::timeout(PACTL_TIMEOUT, Command::new("pactl").args(args).output()).await {
        Ok(Ok(out)) if out.status.success() => {
            Some(String::from_utf8_lossy(&out.stdout).into_owned())
        }
        Ok(Ok(out)) => {
            debug!(status = ?out.status.code(), ?args, "pactl exited with failure");
            None
        }
        Ok(Err(e)) => {
            debug!(error = %e, "pactl unavailable");
            None
        }
        Err(_) => {
            debug!(?args, "pactl timed out");
            None
        }
    }
}
