// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! bk-engine: Build status reconciliation

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod error;
mod reconcile;

pub use error::ReconcileError;
pub use reconcile::{ItemFailure, ReconcileOutcome, Reconciler};
