// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{Input, MetadataField, Source, Version};
use serde_json::json;

/// A git-style version: `{"ref": <git_ref>}`.
pub fn git_version(git_ref: &str) -> Version {
    Version::new(json!({ "ref": git_ref }))
}

/// A git-style source pointing at `uri`.
pub fn git_source(uri: &str) -> Source {
    Source::new(json!({ "uri": uri, "branch": "main" }))
}

pub fn input(name: &str, git_ref: &str) -> Input {
    Input {
        name: name.to_string(),
        source: git_source(&format!("https://example.com/{}.git", name)),
        version: git_version(git_ref),
        metadata: vec![MetadataField::new("commit", git_ref)],
    }
}
