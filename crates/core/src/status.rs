// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build status state machine.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a build.
///
/// `Pending` is only ever assigned when a build is created; every other
/// value arrives through a status report from the execution agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Created, not yet picked up by an agent
    #[default]
    Pending,
    /// Agent has fetched inputs and is running
    Started,
    Succeeded,
    /// The build's own task failed
    Failed,
    /// The agent could not run the build
    Errored,
}

impl Status {
    /// Check if the build has finished (successfully or not).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Succeeded | Status::Failed | Status::Errored)
    }
}

crate::simple_display! {
    Status {
        Pending => "pending",
        Started => "started",
        Succeeded => "succeeded",
        Failed => "failed",
        Errored => "errored",
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
