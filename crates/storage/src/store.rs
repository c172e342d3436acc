// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The durable build store contract.

use async_trait::async_trait;
use bk_core::{Build, BuildId, Input, Status, Version};
use std::sync::Arc;
use thiserror::Error;

/// Errors from build store operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("build {job}/{id} not found")]
    BuildNotFound { job: String, id: BuildId },
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("no build ids left for job {job}")]
    IdsExhausted { job: String },
}

/// Durable storage for builds and their version bookkeeping.
///
/// Keys are a job name plus, where relevant, a build id. Implementations
/// must make writes to one build's status and to one `(job, input)` cursor
/// linearizable; no cross-key transactions are required.
#[async_trait]
pub trait BuildStore: Send + Sync + 'static {
    /// All builds of a job, ordered by id. Unknown jobs have no builds.
    async fn builds(&self, job: &str) -> Result<Vec<Build>, StoreError>;

    /// Create the next build of a job in `Pending` status.
    async fn create_build(&self, job: &str) -> Result<Build, StoreError>;

    async fn get_build(&self, job: &str, id: BuildId) -> Result<Build, StoreError>;

    /// Overwrite a build's status and return the updated build.
    async fn save_build_status(
        &self,
        job: &str,
        id: BuildId,
        status: Status,
    ) -> Result<Build, StoreError>;

    /// Overwrite the job-scoped cursor for the latest version of an input.
    async fn save_current_version(
        &self,
        job: &str,
        input: &str,
        version: &Version,
    ) -> Result<(), StoreError>;

    /// Record (or replace, by name) an input consumed by a build.
    async fn save_build_input(&self, job: &str, id: BuildId, input: &Input)
        -> Result<(), StoreError>;

    /// Record (or replace, by name) the version of an output produced by a build.
    async fn save_output_version(
        &self,
        job: &str,
        id: BuildId,
        output: &str,
        version: &Version,
    ) -> Result<(), StoreError>;

    async fn build_log(&self, job: &str, id: BuildId) -> Result<Vec<u8>, StoreError>;

    /// Replace a build's log.
    async fn save_build_log(&self, job: &str, id: BuildId, log: &[u8]) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: BuildStore + ?Sized> BuildStore for Arc<S> {
    async fn builds(&self, job: &str) -> Result<Vec<Build>, StoreError> {
        (**self).builds(job).await
    }

    async fn create_build(&self, job: &str) -> Result<Build, StoreError> {
        (**self).create_build(job).await
    }

    async fn get_build(&self, job: &str, id: BuildId) -> Result<Build, StoreError> {
        (**self).get_build(job, id).await
    }

    async fn save_build_status(
        &self,
        job: &str,
        id: BuildId,
        status: Status,
    ) -> Result<Build, StoreError> {
        (**self).save_build_status(job, id, status).await
    }

    async fn save_current_version(
        &self,
        job: &str,
        input: &str,
        version: &Version,
    ) -> Result<(), StoreError> {
        (**self).save_current_version(job, input, version).await
    }

    async fn save_build_input(
        &self,
        job: &str,
        id: BuildId,
        input: &Input,
    ) -> Result<(), StoreError> {
        (**self).save_build_input(job, id, input).await
    }

    async fn save_output_version(
        &self,
        job: &str,
        id: BuildId,
        output: &str,
        version: &Version,
    ) -> Result<(), StoreError> {
        (**self).save_output_version(job, id, output, version).await
    }

    async fn build_log(&self, job: &str, id: BuildId) -> Result<Vec<u8>, StoreError> {
        (**self).build_log(job, id).await
    }

    async fn save_build_log(&self, job: &str, id: BuildId, log: &[u8]) -> Result<(), StoreError> {
        (**self).save_build_log(job, id, log).await
    }
}
