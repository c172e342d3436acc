// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reconciliation errors

use bk_storage::StoreError;
use thiserror::Error;

/// Reasons a report was not applied at all.
///
/// The first three are caller mistakes and are detected before any store
/// call is made. `Storage` means the status write itself failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error("malformed build id: {0:?}")]
    MalformedIdentifier(String),
    #[error("malformed report: {0}")]
    MalformedReport(String),
    #[error("unrecognized build status: {0:?}")]
    UnrecognizedStatus(String),
    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}

impl ReconcileError {
    /// True if the report itself was at fault and retrying it cannot help.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ReconcileError::Storage(_))
    }
}
