// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use bk_core::{BuildId, Status};
use tempfile::tempdir;

fn sample_state() -> StoreState {
    let mut state = StoreState::default();
    state.set_status("app", BuildId(1), Status::Succeeded);
    state
}

#[test]
fn load_missing_returns_none() {
    let dir = tempdir().unwrap();
    assert!(load_snapshot(&dir.path().join("snapshot.json")).unwrap().is_none());
}

#[test]
fn save_then_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/snapshot.json");

    Snapshot::new(7, sample_state()).save(&path).unwrap();
    let loaded = load_snapshot(&path).unwrap().unwrap();

    assert_eq!(loaded.seq, 7);
    assert_eq!(loaded.version, CURRENT_SNAPSHOT_VERSION);
    assert_eq!(loaded.state, sample_state());
    assert!(!path.with_extension("tmp").exists());
}

#[test]
fn save_rotates_previous_snapshot() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snapshot.json");

    Snapshot::new(1, StoreState::default()).save(&path).unwrap();
    Snapshot::new(2, sample_state()).save(&path).unwrap();
    Snapshot::new(3, sample_state()).save(&path).unwrap();

    assert_eq!(load_snapshot(&path).unwrap().unwrap().seq, 3);
    let bak: Snapshot =
        serde_json::from_slice(&std::fs::read(path.with_extension("bak")).unwrap()).unwrap();
    assert_eq!(bak.seq, 2);
    assert!(path.with_extension("bak.2").exists());
}

#[test]
fn replacing_save_keeps_live_file_and_copies_backup() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    Snapshot::new(1, sample_state()).save(&path).unwrap();
    let first = std::fs::read(&path).unwrap();

    // Backups are taken before the live file is touched
    let bak = rotate_bak_path(&path);
    std::fs::copy(&path, &bak).unwrap();
    assert_eq!(load_snapshot(&path).unwrap().unwrap().seq, 1);

    Snapshot::new(2, StoreState::default()).save(&path).unwrap();

    assert!(path.exists());
    assert_eq!(load_snapshot(&path).unwrap().unwrap().seq, 2);
    assert_eq!(std::fs::read(path.with_extension("bak")).unwrap(), first);
    assert!(!path.with_extension("tmp").exists());
}

#[test]
fn interrupted_save_leaves_previous_snapshot_loadable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    Snapshot::new(4, sample_state()).save(&path).unwrap();

    // A crash after writing the temp file but before the rename
    std::fs::write(path.with_extension("tmp"), b"{partial").unwrap();

    let loaded = load_snapshot(&path).unwrap().unwrap();
    assert_eq!(loaded.seq, 4);
    assert_eq!(loaded.state, sample_state());

    Snapshot::new(5, sample_state()).save(&path).unwrap();
    assert_eq!(load_snapshot(&path).unwrap().unwrap().seq, 5);
}

#[test]
fn rotation_is_capped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snapshot.json");

    for seq in 0..6 {
        Snapshot::new(seq, StoreState::default()).save(&path).unwrap();
    }

    assert!(path.with_extension("bak").exists());
    assert!(path.with_extension("bak.3").exists());
    assert!(!path.with_extension("bak.4").exists());
}

#[test]
fn newer_schema_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    let mut snapshot = Snapshot::new(1, StoreState::default());
    snapshot.version = CURRENT_SNAPSHOT_VERSION + 1;
    snapshot.save(&path).unwrap();

    assert!(matches!(load_snapshot(&path), Err(SnapshotError::UnsupportedVersion(2))));
}

#[test]
fn corrupt_snapshot_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    std::fs::write(&path, b"{not json").unwrap();

    assert!(matches!(load_snapshot(&path), Err(SnapshotError::Json(_))));
}
