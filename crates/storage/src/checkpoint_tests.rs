// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::store::BuildStore;
use bk_core::test_support::git_version;
use bk_core::{BuildId, FakeClock, Status};
use tempfile::tempdir;

#[tokio::test]
async fn checkpoint_skips_when_unchanged() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    let (store, mut checkpointer) = recover(&path, FakeClock::new()).unwrap();

    assert!(!checkpointer.checkpoint().unwrap());
    assert!(!path.exists());

    store.save_build_status("app", BuildId(1), Status::Started).await.unwrap();
    assert!(checkpointer.checkpoint().unwrap());
    assert!(!checkpointer.checkpoint().unwrap());
}

#[tokio::test]
async fn recover_restores_state_and_sequence() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    {
        let (store, mut checkpointer) = recover(&path, FakeClock::new()).unwrap();
        store.save_build_status("app", BuildId(4), Status::Started).await.unwrap();
        store.save_current_version("app", "repo", &git_version("abc")).await.unwrap();
        checkpointer.checkpoint().unwrap();
    }

    let (store, mut checkpointer) = recover(&path, FakeClock::new()).unwrap();

    assert_eq!(store.seq(), 2);
    assert_eq!(store.get_build("app", BuildId(4)).await.unwrap().status, Status::Started);
    assert_eq!(store.current_version("app", "repo"), Some(git_version("abc")));
    assert!(!checkpointer.checkpoint().unwrap());
    assert_eq!(checkpointer.path(), path.as_path());
}
