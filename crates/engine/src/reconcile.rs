// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Applying agent status reports to the build store.
//!
//! The status write comes first and gates everything else. Per-item
//! bookkeeping after it is best effort: each input/output is written
//! independently and failures are collected rather than aborting the
//! remaining items.

use bk_core::{Build, BuildId, Status, Version};
use bk_storage::{BuildStore, StoreError};
use bk_wire::{
    input_from_report, translate_status, BuildReport, FailureEntry, FailureKind, ReconcileBody,
};

use crate::error::ReconcileError;

/// A per-item bookkeeping write that failed after the status was saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    pub kind: FailureKind,
    /// Input or output name
    pub name: String,
    pub error: StoreError,
}

/// Result of a report whose status write succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// The build as returned by the status write
    pub build: Build,
    pub failures: Vec<ItemFailure>,
}

impl ReconcileOutcome {
    /// True when every bookkeeping write succeeded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn to_body(&self) -> ReconcileBody {
        ReconcileBody {
            status: self.build.status,
            failures: self
                .failures
                .iter()
                .map(|f| FailureEntry {
                    kind: f.kind,
                    name: f.name.clone(),
                    error: f.error.to_string(),
                })
                .collect(),
        }
    }
}

/// Applies status reports for running builds.
///
/// Holds no state of its own; everything goes through the store.
pub struct Reconciler<S> {
    store: S,
}

impl<S: BuildStore> Reconciler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate and apply a report in its transport form.
    ///
    /// Nothing is written unless the id parses, the body decodes, and the
    /// status is one the agent may report.
    pub async fn reconcile_raw(
        &self,
        job: &str,
        build: &str,
        body: &[u8],
    ) -> Result<ReconcileOutcome, ReconcileError> {
        let id: BuildId =
            build.parse().map_err(|_| ReconcileError::MalformedIdentifier(build.to_string()))?;
        let report = BuildReport::from_slice(body)
            .map_err(|e| ReconcileError::MalformedReport(e.to_string()))?;
        self.reconcile(job, id, &report).await
    }

    /// Apply a decoded report to build `id` of `job`.
    pub async fn reconcile(
        &self,
        job: &str,
        id: BuildId,
        report: &BuildReport,
    ) -> Result<ReconcileOutcome, ReconcileError> {
        tracing::debug!(job, build = %id, report = ?report, "updating build");

        let status = translate_status(&report.status).map_err(|e| {
            tracing::info!(job, build = %id, status = %report.status, "unknown status");
            ReconcileError::UnrecognizedStatus(e.0)
        })?;

        let build = self.store.save_build_status(job, id, status).await.map_err(|e| {
            tracing::error!(job, build = %id, %status, error = %e, "failed to save build status");
            ReconcileError::Storage(e)
        })?;
        tracing::info!(job, build = %id, %status, "saved build status");

        let failures = match status {
            Status::Started => self.record_inputs(job, id, report).await,
            Status::Succeeded => self.record_outputs(job, id, report).await,
            Status::Pending | Status::Failed | Status::Errored => Vec::new(),
        };

        if !failures.is_empty() {
            tracing::warn!(
                job,
                build = %id,
                %status,
                failed = failures.len(),
                "report partially applied"
            );
        }

        Ok(ReconcileOutcome { build, failures })
    }

    async fn record_inputs(
        &self,
        job: &str,
        id: BuildId,
        report: &BuildReport,
    ) -> Vec<ItemFailure> {
        let mut failures = Vec::new();
        for reported in &report.inputs {
            let input = input_from_report(reported);

            if let Err(e) = self.store.save_current_version(job, &input.name, &input.version).await
            {
                tracing::warn!(
                    job,
                    input = %input.name,
                    error = %e,
                    "error saving current version"
                );
                failures.push(ItemFailure {
                    kind: FailureKind::CurrentVersion,
                    name: input.name.clone(),
                    error: e,
                });
            }

            if let Err(e) = self.store.save_build_input(job, id, &input).await {
                tracing::warn!(
                    job,
                    build = %id,
                    input = %input.name,
                    error = %e,
                    "error saving input"
                );
                failures.push(ItemFailure {
                    kind: FailureKind::BuildInput,
                    name: input.name.clone(),
                    error: e,
                });
            }
        }
        failures
    }

    async fn record_outputs(
        &self,
        job: &str,
        id: BuildId,
        report: &BuildReport,
    ) -> Vec<ItemFailure> {
        let mut failures = Vec::new();
        for output in &report.outputs {
            let version = Version::new(output.version.clone());
            if let Err(e) = self.store.save_output_version(job, id, &output.name, &version).await {
                tracing::warn!(
                    job,
                    build = %id,
                    output = %output.name,
                    error = %e,
                    "error saving output version"
                );
                failures.push(ItemFailure {
                    kind: FailureKind::OutputVersion,
                    name: output.name.clone(),
                    error: e,
                });
            }
        }
        failures
    }
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
