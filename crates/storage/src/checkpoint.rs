// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Periodic snapshotting of a [`MemoryStore`].

use bk_core::Clock;
use std::path::{Path, PathBuf};

use crate::memory::MemoryStore;
use crate::snapshot::{load_snapshot, Snapshot, SnapshotError};

/// Writes a snapshot whenever the store has changed since the last one.
pub struct Checkpointer<C: Clock> {
    store: MemoryStore<C>,
    path: PathBuf,
    last_seq: u64,
}

impl<C: Clock> Checkpointer<C> {
    /// `last_seq` is the sequence already on disk (0 for a fresh store).
    pub fn new(store: MemoryStore<C>, path: PathBuf, last_seq: u64) -> Self {
        Self { store, path, last_seq }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Save a snapshot if the store advanced. Returns whether one was written.
    pub fn checkpoint(&mut self) -> Result<bool, SnapshotError> {
        let (state, seq) = self.store.snapshot_state();
        if seq == self.last_seq {
            return Ok(false);
        }
        Snapshot::new(seq, state).save(&self.path)?;
        tracing::debug!(seq, path = %self.path.display(), "wrote snapshot");
        self.last_seq = seq;
        Ok(true)
    }
}

/// Open a store from the snapshot at `path`, or start empty.
///
/// Returns the store and a checkpointer positioned at the recovered sequence.
pub fn recover<C: Clock>(
    path: &Path,
    clock: C,
) -> Result<(MemoryStore<C>, Checkpointer<C>), SnapshotError> {
    let (state, seq) = match load_snapshot(path)? {
        Some(snapshot) => {
            tracing::info!(
                seq = snapshot.seq,
                jobs = snapshot.state.jobs.len(),
                "loaded snapshot from {}",
                snapshot.created_at
            );
            (snapshot.state, snapshot.seq)
        }
        None => {
            tracing::info!("no snapshot found, starting with empty state");
            Default::default()
        }
    };
    let store = MemoryStore::from_state(state, seq, clock);
    let checkpointer = Checkpointer::new(store.clone(), path.to_path_buf(), seq);
    Ok((store, checkpointer))
}

#[cfg(test)]
#[path = "checkpoint_tests.rs"]
mod tests;
