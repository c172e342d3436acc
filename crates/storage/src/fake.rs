// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Call-recording build store for tests.

use async_trait::async_trait;
use bk_core::{Build, BuildId, FakeClock, Input, Status, Version};
use parking_lot::Mutex;
use std::sync::Arc;

use crate::memory::MemoryStore;
use crate::store::{BuildStore, StoreError};

/// Recorded store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Builds { job: String },
    CreateBuild { job: String },
    GetBuild { job: String, id: BuildId },
    SaveBuildStatus { job: String, id: BuildId, status: Status },
    SaveCurrentVersion { job: String, input: String, version: Version },
    SaveBuildInput { job: String, id: BuildId, input: Input },
    SaveOutputVersion { job: String, id: BuildId, output: String, version: Version },
    BuildLog { job: String, id: BuildId },
    SaveBuildLog { job: String, id: BuildId, log: Vec<u8> },
}

impl StoreCall {
    /// True for calls that mutate the store.
    pub fn is_write(&self) -> bool {
        !matches!(
            self,
            StoreCall::Builds { .. } | StoreCall::GetBuild { .. } | StoreCall::BuildLog { .. }
        )
    }
}

type FailPredicate = Box<dyn Fn(&StoreCall) -> bool + Send + Sync>;

#[derive(Default)]
struct FakeStoreState {
    calls: Vec<StoreCall>,
    fail_when: Option<FailPredicate>,
}

/// Fake build store for testing.
///
/// Records every call, fails the ones matching [`fail_when`](Self::fail_when)
/// with `StoreError::Unavailable`, and applies the rest to an in-memory store.
#[derive(Clone)]
pub struct FakeBuildStore {
    inner: Arc<Mutex<FakeStoreState>>,
    memory: MemoryStore<FakeClock>,
}

impl Default for FakeBuildStore {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeStoreState::default())),
            memory: MemoryStore::with_clock(FakeClock::new()),
        }
    }
}

impl FakeBuildStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every subsequent call for which `predicate` returns true.
    pub fn fail_when(&self, predicate: impl Fn(&StoreCall) -> bool + Send + Sync + 'static) {
        self.inner.lock().fail_when = Some(Box::new(predicate));
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StoreCall> {
        self.inner.lock().calls.clone()
    }

    /// Get recorded calls that mutate the store
    pub fn writes(&self) -> Vec<StoreCall> {
        self.calls().into_iter().filter(StoreCall::is_write).collect()
    }

    /// The store that successful calls were applied to.
    pub fn memory(&self) -> &MemoryStore<FakeClock> {
        &self.memory
    }

    fn record(&self, call: StoreCall) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        let fail = inner.fail_when.as_ref().is_some_and(|p| p(&call));
        let err = fail.then(|| StoreError::Unavailable(format!("injected failure: {:?}", call)));
        inner.calls.push(call);
        match err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BuildStore for FakeBuildStore {
    async fn builds(&self, job: &str) -> Result<Vec<Build>, StoreError> {
        self.record(StoreCall::Builds { job: job.to_string() })?;
        self.memory.builds(job).await
    }

    async fn create_build(&self, job: &str) -> Result<Build, StoreError> {
        self.record(StoreCall::CreateBuild { job: job.to_string() })?;
        self.memory.create_build(job).await
    }

    async fn get_build(&self, job: &str, id: BuildId) -> Result<Build, StoreError> {
        self.record(StoreCall::GetBuild { job: job.to_string(), id })?;
        self.memory.get_build(job, id).await
    }

    async fn save_build_status(
        &self,
        job: &str,
        id: BuildId,
        status: Status,
    ) -> Result<Build, StoreError> {
        self.record(StoreCall::SaveBuildStatus { job: job.to_string(), id, status })?;
        self.memory.save_build_status(job, id, status).await
    }

    async fn save_current_version(
        &self,
        job: &str,
        input: &str,
        version: &Version,
    ) -> Result<(), StoreError> {
        self.record(StoreCall::SaveCurrentVersion {
            job: job.to_string(),
            input: input.to_string(),
            version: version.clone(),
        })?;
        self.memory.save_current_version(job, input, version).await
    }

    async fn save_build_input(
        &self,
        job: &str,
        id: BuildId,
        input: &Input,
    ) -> Result<(), StoreError> {
        self.record(StoreCall::SaveBuildInput { job: job.to_string(), id, input: input.clone() })?;
        self.memory.save_build_input(job, id, input).await
    }

    async fn save_output_version(
        &self,
        job: &str,
        id: BuildId,
        output: &str,
        version: &Version,
    ) -> Result<(), StoreError> {
        self.record(StoreCall::SaveOutputVersion {
            job: job.to_string(),
            id,
            output: output.to_string(),
            version: version.clone(),
        })?;
        self.memory.save_output_version(job, id, output, version).await
    }

    async fn build_log(&self, job: &str, id: BuildId) -> Result<Vec<u8>, StoreError> {
        self.record(StoreCall::BuildLog { job: job.to_string(), id })?;
        self.memory.build_log(job, id).await
    }

    async fn save_build_log(&self, job: &str, id: BuildId, log: &[u8]) -> Result<(), StoreError> {
        self.record(StoreCall::SaveBuildLog { job: job.to_string(), id, log: log.to_vec() })?;
        self.memory.save_build_log(job, id, log).await
    }
}
