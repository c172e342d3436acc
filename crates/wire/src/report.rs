// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status reports sent by the execution agent.
//!
//! These mirror the agent's JSON vocabulary and are kept separate from the
//! `bk-core` records they are translated into.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Body of `PUT /builds/{job}/{build}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    pub status: ReportStatus,
    #[serde(default)]
    pub inputs: Vec<ReportInput>,
    #[serde(default)]
    pub outputs: Vec<ReportOutput>,
}

impl BuildReport {
    pub fn new(status: ReportStatus) -> Self {
        Self { status, inputs: Vec::new(), outputs: Vec::new() }
    }

    /// Decode a report body.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

/// Status token as reported by the agent.
///
/// Tokens outside the agent's vocabulary still decode, into
/// `Unrecognized`, so that they are rejected by translation rather than
/// treated as a malformed body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportStatus {
    Started,
    Succeeded,
    Failed,
    Errored,
    Unrecognized(String),
}

impl ReportStatus {
    pub fn from_token(token: &str) -> Self {
        match token {
            "started" => ReportStatus::Started,
            "succeeded" => ReportStatus::Succeeded,
            "failed" => ReportStatus::Failed,
            "errored" => ReportStatus::Errored,
            other => ReportStatus::Unrecognized(other.to_string()),
        }
    }

    pub fn as_token(&self) -> &str {
        match self {
            ReportStatus::Started => "started",
            ReportStatus::Succeeded => "succeeded",
            ReportStatus::Failed => "failed",
            ReportStatus::Errored => "errored",
            ReportStatus::Unrecognized(token) => token,
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_token())
    }
}

impl Serialize for ReportStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_token())
    }
}

impl<'de> Deserialize<'de> for ReportStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(ReportStatus::from_token(&token))
    }
}

/// An input as fetched by the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportInput {
    pub name: String,
    #[serde(default)]
    pub source: Value,
    #[serde(default)]
    pub version: Value,
    #[serde(default)]
    pub metadata: Vec<ReportMetadataField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadataField {
    pub name: String,
    pub value: String,
}

/// An output as pushed by the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportOutput {
    pub name: String,
    #[serde(default)]
    pub version: Value,
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
