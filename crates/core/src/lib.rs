// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bk-core: Domain types for buildkeep build bookkeeping

pub mod macros;

pub mod artifact;
pub mod build;
pub mod clock;
pub mod status;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use artifact::{Input, MetadataField, Output, Source, Version};
pub use build::{Build, BuildId, BuildIdError};
pub use clock::{Clock, FakeClock, SystemClock};
pub use status::Status;
