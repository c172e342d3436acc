// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Translation from the agent's report vocabulary into core records.

use bk_core::{Input, MetadataField, Output, Source, Status, Version};
use thiserror::Error;

use crate::report::{ReportInput, ReportMetadataField, ReportOutput, ReportStatus};

/// A status token outside the reportable set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized build status: {0:?}")]
pub struct UnrecognizedStatus(pub String);

/// Map a reported status onto the internal status.
///
/// `Pending` is never reportable; it only exists as the initial state of a
/// freshly created build.
pub fn translate_status(status: &ReportStatus) -> Result<Status, UnrecognizedStatus> {
    match status {
        ReportStatus::Started => Ok(Status::Started),
        ReportStatus::Succeeded => Ok(Status::Succeeded),
        ReportStatus::Failed => Ok(Status::Failed),
        ReportStatus::Errored => Ok(Status::Errored),
        ReportStatus::Unrecognized(token) => Err(UnrecognizedStatus(token.clone())),
    }
}

impl TryFrom<&ReportStatus> for Status {
    type Error = UnrecognizedStatus;

    fn try_from(status: &ReportStatus) -> Result<Self, Self::Error> {
        translate_status(status)
    }
}

/// Build the input record stored against a build.
///
/// Source and version pass through untouched; metadata is copied in order.
pub fn input_from_report(input: &ReportInput) -> Input {
    Input {
        name: input.name.clone(),
        source: Source::new(input.source.clone()),
        version: Version::new(input.version.clone()),
        metadata: input.metadata.iter().map(MetadataField::from).collect(),
    }
}

impl From<&ReportInput> for Input {
    fn from(input: &ReportInput) -> Self {
        input_from_report(input)
    }
}

impl From<&ReportMetadataField> for MetadataField {
    fn from(field: &ReportMetadataField) -> Self {
        MetadataField { name: field.name.clone(), value: field.value.clone() }
    }
}

impl From<&ReportOutput> for Output {
    fn from(output: &ReportOutput) -> Self {
        Output { name: output.name.clone(), version: Version::new(output.version.clone()) }
    }
}

#[cfg(test)]
#[path = "translate_tests.rs"]
mod tests;
