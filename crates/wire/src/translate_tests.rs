// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use serde_json::json;

#[yare::parameterized(
    started   = { ReportStatus::Started,   Status::Started },
    succeeded = { ReportStatus::Succeeded, Status::Succeeded },
    failed    = { ReportStatus::Failed,    Status::Failed },
    errored   = { ReportStatus::Errored,   Status::Errored },
)]
fn reportable_statuses_translate(reported: ReportStatus, expected: Status) {
    assert_eq!(translate_status(&reported), Ok(expected));
    assert_eq!(Status::try_from(&reported), Ok(expected));
}

#[yare::parameterized(
    pending = { "pending" },
    weird   = { "weird" },
    empty   = { "" },
)]
fn unknown_tokens_are_rejected(token: &str) {
    let reported = ReportStatus::from_token(token);
    assert_eq!(translate_status(&reported), Err(UnrecognizedStatus(token.to_string())));
}

#[test]
fn input_copies_fields_verbatim() {
    let reported = ReportInput {
        name: "repo".to_string(),
        source: json!({"uri": "https://example.com/app.git", "private_key": "..."}),
        version: json!({"ref": "abc123"}),
        metadata: vec![ReportMetadataField { name: "commit".into(), value: "abc123".into() }],
    };

    let input = input_from_report(&reported);

    assert_eq!(input.name, "repo");
    assert_eq!(
        input.source.as_value(),
        &json!({"uri": "https://example.com/app.git", "private_key": "..."})
    );
    assert_eq!(input.version.as_value(), &json!({"ref": "abc123"}));
    assert_eq!(input.metadata, vec![MetadataField::new("commit", "abc123")]);
}

#[test]
fn output_copies_name_and_version() {
    let reported = ReportOutput { name: "image".into(), version: json!({"digest": "sha256:1"}) };
    let output = Output::from(&reported);
    assert_eq!(output.name, "image");
    assert_eq!(output.version.as_value(), &json!({"digest": "sha256:1"}));
}

fn arb_metadata() -> impl Strategy<Value = Vec<ReportMetadataField>> {
    // Small name alphabet so duplicates are common
    prop::collection::vec(
        ("[abc]", ".{0,8}").prop_map(|(name, value)| ReportMetadataField { name, value }),
        0..12,
    )
}

proptest! {
    #[test]
    fn metadata_keeps_order_and_duplicates(metadata in arb_metadata()) {
        let reported = ReportInput {
            name: "repo".into(),
            source: serde_json::Value::Null,
            version: serde_json::Value::Null,
            metadata: metadata.clone(),
        };

        let input = input_from_report(&reported);

        prop_assert_eq!(input.metadata.len(), metadata.len());
        for (got, want) in input.metadata.iter().zip(metadata.iter()) {
            prop_assert_eq!(&got.name, &want.name);
            prop_assert_eq!(&got.value, &want.value);
        }
    }
}
