// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon startup and initialization logic.

use std::io::Write;
use std::time::Instant;

use bk_core::SystemClock;
use bk_storage::recover;
use fs2::FileExt;
use tokio::net::TcpListener;
use tracing::info;

use super::{Config, DaemonState, LifecycleError, StartupResult};

/// Start the daemon
pub async fn startup(config: &Config) -> Result<StartupResult, LifecycleError> {
    match startup_inner(config).await {
        Ok(result) => Ok(result),
        Err(e) => {
            // A held lock belongs to the running daemon; leave its files alone.
            if !matches!(e, LifecycleError::LockFailed(_)) {
                cleanup_on_failure(config);
            }
            Err(e)
        }
    }
}

async fn startup_inner(config: &Config) -> Result<StartupResult, LifecycleError> {
    // 1. Create state directory
    std::fs::create_dir_all(&config.state_dir)?;

    // 2. Acquire lock file FIRST. Open without truncating so a running
    // daemon's PID survives a failed attempt.
    let lock_file = std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&config.lock_path)?;
    lock_file.try_lock_exclusive().map_err(LifecycleError::LockFailed)?;

    let mut lock_file = lock_file;
    lock_file.set_len(0)?;
    writeln!(lock_file, "{}", std::process::id())?;
    let lock_file = lock_file;

    // 3. Recover store from snapshot
    let (store, checkpointer) = recover(&config.snapshot_path, SystemClock)?;
    let (state, seq) = store.snapshot_state();
    let build_count: usize = state.jobs.values().map(|j| j.builds.len()).sum();
    info!(seq, jobs = state.jobs.len(), builds = build_count, "Recovered state");

    // 4. Bind LAST, only after everything else succeeded
    let listener = TcpListener::bind(config.listen_addr)
        .await
        .map_err(|e| LifecycleError::BindFailed(config.listen_addr, e))?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "Daemon started");

    Ok(StartupResult {
        daemon: DaemonState {
            config: config.clone(),
            lock_file,
            store,
            checkpointer,
            start_time: Instant::now(),
        },
        listener,
    })
}

/// Clean up resources on startup failure
fn cleanup_on_failure(config: &Config) {
    if config.lock_path.exists() {
        let _ = std::fs::remove_file(&config.lock_path);
    }
}

#[cfg(test)]
#[path = "startup_tests.rs"]
mod tests;
