// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use bk_core::test_support::{git_version, input};
use bk_core::FakeClock;
use std::time::Duration;

fn store() -> (MemoryStore<FakeClock>, FakeClock) {
    let clock = FakeClock::new();
    (MemoryStore::with_clock(clock.clone()), clock)
}

#[tokio::test]
async fn create_build_stamps_clock_time() {
    let (store, clock) = store();
    clock.advance(Duration::from_millis(500));

    let build = store.create_build("app").await.unwrap();

    assert_eq!(build.id, BuildId(1));
    assert_eq!(build.created_at_ms, 1_000_500);
    assert_eq!(store.get_build("app", BuildId(1)).await.unwrap(), build);
}

#[tokio::test]
async fn builds_lists_in_id_order() {
    let (store, _) = store();
    store.create_build("app").await.unwrap();
    store.create_build("app").await.unwrap();
    store.save_build_status("app", BuildId(10), Status::Started).await.unwrap();

    let ids: Vec<_> = store.builds("app").await.unwrap().iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![BuildId(1), BuildId(2), BuildId(10)]);
    assert!(store.builds("other").await.unwrap().is_empty());
}

#[tokio::test]
async fn save_build_status_returns_updated_build() {
    let (store, _) = store();
    store.create_build("app").await.unwrap();

    let build = store.save_build_status("app", BuildId(1), Status::Failed).await.unwrap();

    assert_eq!(build.status, Status::Failed);
    assert_eq!(build.created_at_ms, 1_000_000);
}

#[tokio::test]
async fn seq_advances_only_on_successful_writes() {
    let (store, _) = store();
    assert_eq!(store.seq(), 0);

    store.save_build_status("app", BuildId(1), Status::Started).await.unwrap();
    store.save_current_version("app", "repo", &git_version("a")).await.unwrap();
    assert_eq!(store.seq(), 2);

    let err = store.save_build_input("app", BuildId(9), &input("repo", "a")).await;
    assert!(err.is_err());
    store.builds("app").await.unwrap();
    assert_eq!(store.seq(), 2);
}

#[tokio::test]
async fn read_helpers_expose_bookkeeping() {
    let (store, _) = store();
    store.save_build_status("app", BuildId(1), Status::Started).await.unwrap();
    store.save_current_version("app", "repo", &git_version("a")).await.unwrap();
    store.save_build_input("app", BuildId(1), &input("repo", "a")).await.unwrap();
    store.save_output_version("app", BuildId(1), "image", &git_version("i")).await.unwrap();

    assert_eq!(store.current_version("app", "repo"), Some(git_version("a")));
    assert_eq!(store.build_inputs("app", BuildId(1)), vec![input("repo", "a")]);
    assert_eq!(store.output_versions("app", BuildId(1))[0].name, "image");
    assert!(store.build_inputs("app", BuildId(2)).is_empty());
}

#[tokio::test]
async fn build_log_round_trip() {
    let (store, _) = store();
    store.create_build("app").await.unwrap();

    store.save_build_log("app", BuildId(1), b"hello\n").await.unwrap();

    assert_eq!(store.build_log("app", BuildId(1)).await.unwrap(), b"hello\n".to_vec());
    assert!(matches!(
        store.build_log("app", BuildId(2)).await,
        Err(StoreError::BuildNotFound { .. })
    ));
}

#[tokio::test]
async fn clones_share_state() {
    let (store, _) = store();
    let other = store.clone();

    other.create_build("app").await.unwrap();

    assert_eq!(store.builds("app").await.unwrap().len(), 1);
}

#[tokio::test]
async fn concurrent_creates_get_distinct_ids() {
    let store = MemoryStore::new();
    let mut handles = Vec::new();
    for _ in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move { store.create_build("app").await.unwrap().id }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 16);
}
