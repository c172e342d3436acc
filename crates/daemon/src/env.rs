// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;
use std::time::Duration;

use crate::lifecycle::LifecycleError;

/// Default HTTP listen address
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8081";

/// Default cap on request bodies (8 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Resolve state directory: BK_STATE_DIR > XDG_STATE_HOME/buildkeep > ~/.local/state/buildkeep
pub fn state_dir() -> Result<PathBuf, LifecycleError> {
    if let Ok(dir) = std::env::var("BK_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("buildkeep"));
    }
    let home = std::env::var("HOME").map_err(|_| LifecycleError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/buildkeep"))
}

/// Address the HTTP listener binds to.
pub fn listen_addr() -> String {
    std::env::var("BK_LISTEN_ADDR")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
}

/// Time allowed for a client to send a complete request (default 5s).
pub fn request_timeout() -> Duration {
    positive_millis(std::env::var("BK_REQUEST_TIMEOUT_MS").ok().as_deref())
        .unwrap_or(Duration::from_secs(5))
}

/// Snapshot interval (default 1s)
pub fn checkpoint_interval() -> Duration {
    positive_millis(std::env::var("BK_CHECKPOINT_MS").ok().as_deref())
        .unwrap_or(Duration::from_secs(1))
}

/// Parse a millisecond count, ignoring zero and garbage.
fn positive_millis(raw: Option<&str>) -> Option<Duration> {
    raw.and_then(|s| s.parse::<u64>().ok()).filter(|ms| *ms > 0).map(Duration::from_millis)
}

pub fn max_body_bytes() -> usize {
    std::env::var("BK_MAX_BODY_BYTES")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_MAX_BODY_BYTES)
}

/// Log filter directive, e.g. `info` or `bk_engine=debug`
pub fn log_filter() -> String {
    std::env::var("BK_LOG").ok().filter(|s| !s.is_empty()).unwrap_or_else(|| "info".to_string())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
