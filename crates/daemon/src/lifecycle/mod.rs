// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup, checkpointing, shutdown.

mod startup;
pub use startup::startup;

use std::fs::File;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bk_core::SystemClock;
use bk_storage::{BuildStore, Checkpointer, MemoryStore};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::env;

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Root state directory (e.g. ~/.local/state/buildkeep)
    pub state_dir: PathBuf,
    /// Path to lock/PID file
    pub lock_path: PathBuf,
    /// Path to snapshot file
    pub snapshot_path: PathBuf,
    /// Directory for the daemon's own log files
    pub logs_path: PathBuf,
    pub listen_addr: SocketAddr,
    pub request_timeout: Duration,
    pub checkpoint_interval: Duration,
    pub max_body_bytes: usize,
}

impl Config {
    /// Load configuration from the environment.
    pub fn load() -> Result<Self, LifecycleError> {
        Self::load_from(env::state_dir()?)
    }

    /// Load configuration from the environment with an explicit state directory.
    pub fn load_from(state_dir: PathBuf) -> Result<Self, LifecycleError> {
        let mut config = Self::with_state_dir(state_dir);
        config.listen_addr = parse_listen_addr(&env::listen_addr())?;
        config.request_timeout = env::request_timeout();
        config.checkpoint_interval = env::checkpoint_interval();
        config.max_body_bytes = env::max_body_bytes();
        Ok(config)
    }

    /// Configuration rooted at `state_dir` with default settings.
    pub fn with_state_dir(state_dir: PathBuf) -> Self {
        Self {
            lock_path: state_dir.join("bkd.pid"),
            snapshot_path: state_dir.join("snapshot.json"),
            logs_path: state_dir.join("logs"),
            state_dir,
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 8081)),
            request_timeout: Duration::from_secs(5),
            checkpoint_interval: Duration::from_secs(1),
            max_body_bytes: env::DEFAULT_MAX_BODY_BYTES,
        }
    }
}

/// Parse a `host:port` listen address.
pub fn parse_listen_addr(raw: &str) -> Result<SocketAddr, LifecycleError> {
    raw.parse().map_err(|_| LifecycleError::InvalidListenAddr(raw.to_string()))
}

/// Daemon state during operation.
///
/// The listener is returned separately from startup to be spawned as a task.
pub struct DaemonState {
    pub config: Config,
    // NOTE(lifetime): Held to maintain exclusive file lock; released on drop
    #[allow(dead_code)]
    lock_file: File,
    /// Build store shared with the listener
    pub store: MemoryStore<SystemClock>,
    checkpointer: Checkpointer<SystemClock>,
    pub start_time: Instant,
}

/// Result of daemon startup - includes both the daemon state and the listener.
pub struct StartupResult {
    pub daemon: DaemonState,
    /// The bound TCP listener to spawn as a task
    pub listener: TcpListener,
}

impl DaemonState {
    /// Store handle for request handlers.
    pub fn shared_store(&self) -> Arc<dyn BuildStore> {
        Arc::new(self.store.clone())
    }

    /// Write a snapshot if anything changed since the last one.
    pub fn checkpoint(&mut self) -> Result<bool, LifecycleError> {
        Ok(self.checkpointer.checkpoint()?)
    }

    /// Shutdown the daemon gracefully.
    ///
    /// Saves a final snapshot so the next startup sees every accepted report.
    pub fn shutdown(&mut self) -> Result<(), LifecycleError> {
        info!("Shutting down daemon...");

        match self.checkpointer.checkpoint() {
            Ok(true) => info!(seq = self.store.seq(), "saved final shutdown snapshot"),
            Ok(false) => {}
            Err(e) => warn!("Failed to save shutdown snapshot: {}", e),
        }

        if self.config.lock_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.config.lock_path) {
                warn!("Failed to remove PID file: {}", e);
            }
        }

        // Lock is released when self.lock_file is dropped
        info!(uptime_secs = self.start_time.elapsed().as_secs(), "Daemon shutdown complete");
        Ok(())
    }
}

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Could not determine state directory")]
    NoStateDir,

    #[error("Failed to acquire lock: daemon already running?")]
    LockFailed(#[source] std::io::Error),

    #[error("Failed to bind {0}: {1}")]
    BindFailed(SocketAddr, std::io::Error),

    #[error("Invalid listen address: {0:?}")]
    InvalidListenAddr(String),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] bk_storage::SnapshotError),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
