// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use bk_core::{BuildId, Status};
use bk_storage::BuildStore;
use std::path::Path;
use tempfile::tempdir;

fn test_config(dir: &Path) -> Config {
    let mut config = Config::with_state_dir(dir.to_path_buf());
    config.listen_addr = "127.0.0.1:0".parse().unwrap();
    config
}

#[tokio::test]
async fn startup_writes_pid_and_binds() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());

    let result = startup(&config).await.unwrap();

    let pid = std::fs::read_to_string(&config.lock_path).unwrap();
    assert_eq!(pid.trim(), std::process::id().to_string());
    assert_ne!(result.listener.local_addr().unwrap().port(), 0);
    assert_eq!(result.daemon.store.seq(), 0);
}

#[tokio::test]
async fn startup_lock_failed_does_not_remove_existing_files() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());

    let _running = startup(&config).await.unwrap();
    let pid_before = std::fs::read_to_string(&config.lock_path).unwrap();

    let err = startup(&config).await.err().unwrap();
    assert!(matches!(err, LifecycleError::LockFailed(_)), "got {:?}", err);

    assert!(config.lock_path.exists(), "lock file must survive a failed second start");
    assert_eq!(std::fs::read_to_string(&config.lock_path).unwrap(), pid_before);
}

#[tokio::test]
async fn bind_failure_cleans_up_lock_file() {
    let dir = tempdir().unwrap();
    let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let mut config = test_config(dir.path());
    config.listen_addr = occupied.local_addr().unwrap();

    let err = startup(&config).await.err().unwrap();

    assert!(matches!(err, LifecycleError::BindFailed(..)), "got {:?}", err);
    assert!(!config.lock_path.exists());
}

#[tokio::test]
async fn shutdown_snapshot_is_recovered_on_next_start() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());

    {
        let mut result = startup(&config).await.unwrap();
        let store = result.daemon.shared_store();
        store.save_build_status("build-app", BuildId(42), Status::Started).await.unwrap();
        result.daemon.shutdown().unwrap();
        assert!(config.snapshot_path.exists());
        assert!(!config.lock_path.exists());
    }

    let result = startup(&config).await.unwrap();
    let build = result.daemon.store.get_build("build-app", BuildId(42)).await.unwrap();
    assert_eq!(build.status, Status::Started);
    assert_eq!(result.daemon.store.seq(), 1);
}

#[tokio::test]
async fn checkpoint_only_writes_when_store_changed() {
    let dir = tempdir().unwrap();
    let config = test_config(dir.path());
    let mut result = startup(&config).await.unwrap();

    assert!(!result.daemon.checkpoint().unwrap());
    assert!(!config.snapshot_path.exists());

    result.daemon.store.create_build("build-app").await.unwrap();
    assert!(result.daemon.checkpoint().unwrap());
    assert!(config.snapshot_path.exists());
    assert!(!result.daemon.checkpoint().unwrap());
}
