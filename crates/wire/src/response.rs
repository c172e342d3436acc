// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON response bodies returned to the agent.

use bk_core::Status;
use serde::{Deserialize, Serialize};

/// Which piece of per-item bookkeeping a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    CurrentVersion,
    BuildInput,
    OutputVersion,
}

bk_core::simple_display! {
    FailureKind {
        CurrentVersion => "current_version",
        BuildInput => "build_input",
        OutputVersion => "output_version",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureEntry {
    pub kind: FailureKind,
    /// Input or output name
    pub name: String,
    pub error: String,
}

/// Result of applying a report whose status write succeeded.
///
/// An empty `failures` list means the report was fully applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileBody {
    pub status: Status,
    #[serde(default)]
    pub failures: Vec<FailureEntry>,
}

/// Body for rejected or failed requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl std::fmt::Display) -> Self {
        Self { error: error.to_string() }
    }
}
