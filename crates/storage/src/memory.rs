// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process build store.
//!
//! Every operation runs under a single mutex, so writes to the same key
//! are linearizable.

use async_trait::async_trait;
use bk_core::{Build, BuildId, Clock, Input, Output, Status, SystemClock, Version};
use parking_lot::Mutex;
use std::sync::Arc;

use crate::state::StoreState;
use crate::store::{BuildStore, StoreError};

struct Inner {
    state: StoreState,
    /// Bumped on every successful mutation
    seq: u64,
}

/// Build store held in memory, persisted by the [`Checkpointer`](crate::Checkpointer).
#[derive(Clone)]
pub struct MemoryStore<C: Clock = SystemClock> {
    inner: Arc<Mutex<Inner>>,
    clock: C,
}

impl MemoryStore<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for MemoryStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MemoryStore<C> {
    pub fn with_clock(clock: C) -> Self {
        Self::from_state(StoreState::default(), 0, clock)
    }

    /// Resume from recovered state at write sequence `seq`.
    pub fn from_state(state: StoreState, seq: u64, clock: C) -> Self {
        Self { inner: Arc::new(Mutex::new(Inner { state, seq })), clock }
    }

    /// Write sequence number of the latest mutation.
    pub fn seq(&self) -> u64 {
        self.inner.lock().seq
    }

    /// Clone the current state along with its write sequence number.
    pub fn snapshot_state(&self) -> (StoreState, u64) {
        let inner = self.inner.lock();
        (inner.state.clone(), inner.seq)
    }

    pub fn current_version(&self, job: &str, input: &str) -> Option<Version> {
        self.inner.lock().state.current_version(job, input).cloned()
    }

    pub fn build_inputs(&self, job: &str, id: BuildId) -> Vec<Input> {
        self.inner.lock().state.record(job, id).map(|r| r.inputs.clone()).unwrap_or_default()
    }

    pub fn output_versions(&self, job: &str, id: BuildId) -> Vec<Output> {
        self.inner.lock().state.record(job, id).map(|r| r.outputs.clone()).unwrap_or_default()
    }

    /// Run a mutation and bump the write sequence if it succeeded.
    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut StoreState) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut inner = self.inner.lock();
        let result = f(&mut inner.state)?;
        inner.seq += 1;
        Ok(result)
    }
}

#[async_trait]
impl<C: Clock> BuildStore for MemoryStore<C> {
    async fn builds(&self, job: &str) -> Result<Vec<Build>, StoreError> {
        Ok(self.inner.lock().state.builds(job))
    }

    async fn create_build(&self, job: &str) -> Result<Build, StoreError> {
        let now = self.clock.epoch_ms();
        let build = self.mutate(|state| state.create_build(job, now))?;
        tracing::debug!(job, build = %build.id, "created build");
        Ok(build)
    }

    async fn get_build(&self, job: &str, id: BuildId) -> Result<Build, StoreError> {
        self.inner.lock().state.get_build(job, id)
    }

    async fn save_build_status(
        &self,
        job: &str,
        id: BuildId,
        status: Status,
    ) -> Result<Build, StoreError> {
        let build = self.mutate(|state| Ok(state.set_status(job, id, status)))?;
        tracing::debug!(job, build = %id, %status, "saved build status");
        Ok(build)
    }

    async fn save_current_version(
        &self,
        job: &str,
        input: &str,
        version: &Version,
    ) -> Result<(), StoreError> {
        self.mutate(|state| {
            state.set_current_version(job, input, version);
            Ok(())
        })
    }

    async fn save_build_input(
        &self,
        job: &str,
        id: BuildId,
        input: &Input,
    ) -> Result<(), StoreError> {
        self.mutate(|state| state.set_input(job, id, input))
    }

    async fn save_output_version(
        &self,
        job: &str,
        id: BuildId,
        output: &str,
        version: &Version,
    ) -> Result<(), StoreError> {
        self.mutate(|state| state.set_output_version(job, id, output, version))
    }

    async fn build_log(&self, job: &str, id: BuildId) -> Result<Vec<u8>, StoreError> {
        self.inner.lock().state.log(job, id).map(<[u8]>::to_vec)
    }

    async fn save_build_log(&self, job: &str, id: BuildId, log: &[u8]) -> Result<(), StoreError> {
        self.mutate(|state| state.set_log(job, id, log.to_vec()))
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
