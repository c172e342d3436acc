// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized store contents.
//!
//! All mutations are overwrites keyed by name or id, so applying the same
//! write twice leaves the state unchanged after the first application.

use bk_core::{Build, BuildId, Input, Output, Status, Version};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::store::StoreError;

/// Everything the store knows, keyed by job name.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreState {
    pub jobs: HashMap<String, JobState>,
}

/// Builds and version cursors of one job.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobState {
    pub builds: BTreeMap<BuildId, BuildRecord>,
    /// Input name → most recently observed version
    #[serde(default)]
    pub current_versions: HashMap<String, Version>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildRecord {
    pub build: Build,
    /// Inputs in first-reported order, unique by name
    #[serde(default)]
    pub inputs: Vec<Input>,
    /// Outputs in first-reported order, unique by name
    #[serde(default)]
    pub outputs: Vec<Output>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub log: Vec<u8>,
}

impl BuildRecord {
    fn new(build: Build) -> Self {
        Self { build, inputs: Vec::new(), outputs: Vec::new(), log: Vec::new() }
    }
}

impl StoreState {
    pub fn job(&self, job: &str) -> Option<&JobState> {
        self.jobs.get(job)
    }

    pub fn record(&self, job: &str, id: BuildId) -> Option<&BuildRecord> {
        self.jobs.get(job).and_then(|j| j.builds.get(&id))
    }

    fn record_mut(&mut self, job: &str, id: BuildId) -> Result<&mut BuildRecord, StoreError> {
        self.jobs
            .get_mut(job)
            .and_then(|j| j.builds.get_mut(&id))
            .ok_or_else(|| StoreError::BuildNotFound { job: job.to_string(), id })
    }

    pub fn builds(&self, job: &str) -> Vec<Build> {
        self.jobs
            .get(job)
            .map(|j| j.builds.values().map(|r| r.build.clone()).collect())
            .unwrap_or_default()
    }

    pub fn get_build(&self, job: &str, id: BuildId) -> Result<Build, StoreError> {
        self.record(job, id)
            .map(|r| r.build.clone())
            .ok_or_else(|| StoreError::BuildNotFound { job: job.to_string(), id })
    }

    /// Allocate the next build id of a job and record it as pending.
    ///
    /// Fails once the job holds build `u64::MAX`; existing records are
    /// never replaced.
    pub fn create_build(&mut self, job: &str, created_at_ms: u64) -> Result<Build, StoreError> {
        let job_state = self.jobs.entry(job.to_string()).or_default();
        let id = match job_state.builds.keys().next_back() {
            Some(highest) => highest
                .next()
                .ok_or_else(|| StoreError::IdsExhausted { job: job.to_string() })?,
            None => BuildId(1),
        };
        let build = Build::new(job, id, created_at_ms);
        job_state.builds.insert(id, BuildRecord::new(build.clone()));
        Ok(build)
    }

    /// Overwrite a build's status, recording the build if this store has
    /// not seen it yet.
    pub fn set_status(&mut self, job: &str, id: BuildId, status: Status) -> Build {
        let record = self
            .jobs
            .entry(job.to_string())
            .or_default()
            .builds
            .entry(id)
            .or_insert_with(|| BuildRecord::new(Build::new(job, id, 0)));
        record.build.status = status;
        record.build.clone()
    }

    pub fn set_current_version(&mut self, job: &str, input: &str, version: &Version) {
        self.jobs
            .entry(job.to_string())
            .or_default()
            .current_versions
            .insert(input.to_string(), version.clone());
    }

    pub fn current_version(&self, job: &str, input: &str) -> Option<&Version> {
        self.jobs.get(job).and_then(|j| j.current_versions.get(input))
    }

    pub fn set_input(&mut self, job: &str, id: BuildId, input: &Input) -> Result<(), StoreError> {
        let record = self.record_mut(job, id)?;
        match record.inputs.iter_mut().find(|i| i.name == input.name) {
            Some(existing) => *existing = input.clone(),
            None => record.inputs.push(input.clone()),
        }
        Ok(())
    }

    pub fn set_output_version(
        &mut self,
        job: &str,
        id: BuildId,
        output: &str,
        version: &Version,
    ) -> Result<(), StoreError> {
        let record = self.record_mut(job, id)?;
        match record.outputs.iter_mut().find(|o| o.name == output) {
            Some(existing) => existing.version = version.clone(),
            None => {
                record.outputs.push(Output { name: output.to_string(), version: version.clone() })
            }
        }
        Ok(())
    }

    pub fn log(&self, job: &str, id: BuildId) -> Result<&[u8], StoreError> {
        self.record(job, id)
            .map(|r| r.log.as_slice())
            .ok_or_else(|| StoreError::BuildNotFound { job: job.to_string(), id })
    }

    pub fn set_log(&mut self, job: &str, id: BuildId, log: Vec<u8>) -> Result<(), StoreError> {
        self.record_mut(job, id)?.log = log;
        Ok(())
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
