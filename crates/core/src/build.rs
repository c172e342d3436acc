// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build identifier and record.

use crate::status::Status;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Per-job build number.
///
/// Numbers are assigned by the store when a build is created and are only
/// unique within a job.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BuildId(pub u64);

impl BuildId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    /// The id following this one, or `None` at `u64::MAX`.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

/// A build id that could not be parsed from its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed build id: {0:?}")]
pub struct BuildIdError(pub String);

impl FromStr for BuildId {
    type Err = BuildIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(BuildId).map_err(|_| BuildIdError(s.to_string()))
    }
}

impl std::fmt::Display for BuildId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BuildId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Snapshot of a single build of a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    pub id: BuildId,
    pub job: String,
    pub status: Status,
    /// Epoch milliseconds at creation (0 when first seen through a report)
    #[serde(default)]
    pub created_at_ms: u64,
}

impl Build {
    pub fn new(job: impl Into<String>, id: BuildId, created_at_ms: u64) -> Self {
        Self { id, job: job.into(), status: Status::Pending, created_at_ms }
    }
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
