// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire vocabulary shared with the execution agent.
//!
//! Reports arrive as JSON and are translated into `bk-core` records before
//! anything is persisted.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod report;
mod response;
mod translate;

pub use report::{BuildReport, ReportInput, ReportMetadataField, ReportOutput, ReportStatus};
pub use response::{ErrorBody, FailureEntry, FailureKind, ReconcileBody};
pub use translate::{input_from_report, translate_status, UnrecognizedStatus};
