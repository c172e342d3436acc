// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Input and output records attached to builds.
//!
//! Versions and source configurations are owned by the resource type that
//! produced them, so both are carried as opaque JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque resource version, e.g. `{"ref": "abc123"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(pub Value);

impl Version {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Version {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Opaque resource source configuration (uri, branch, credentials, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Source(pub Value);

impl Source {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for Source {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// A name/value pair describing a fetched version (author, message, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataField {
    pub name: String,
    pub value: String,
}

impl MetadataField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// An input consumed by a build.
///
/// `name` is unique within one build's input set. `metadata` keeps the
/// order it was reported in and may contain repeated names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    pub name: String,
    #[serde(default)]
    pub source: Source,
    #[serde(default)]
    pub version: Version,
    #[serde(default)]
    pub metadata: Vec<MetadataField>,
}

/// An output produced by a successful build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub name: String,
    #[serde(default)]
    pub version: Version,
}

#[cfg(test)]
#[path = "artifact_tests.rs"]
mod tests;
