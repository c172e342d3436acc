// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage layer for buildkeep

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod checkpoint;
mod memory;
mod snapshot;
mod state;
mod store;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeBuildStore, StoreCall};

pub use checkpoint::{recover, Checkpointer};
pub use memory::MemoryStore;
pub use snapshot::{load_snapshot, Snapshot, SnapshotError, CURRENT_SNAPSHOT_VERSION};
pub use state::{BuildRecord, JobState, StoreState};
pub use store::{BuildStore, StoreError};
