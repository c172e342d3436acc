// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn config_paths_live_under_state_dir() {
    let config = Config::with_state_dir(PathBuf::from("/var/lib/bk"));

    assert_eq!(config.lock_path, PathBuf::from("/var/lib/bk/bkd.pid"));
    assert_eq!(config.snapshot_path, PathBuf::from("/var/lib/bk/snapshot.json"));
    assert_eq!(config.logs_path, PathBuf::from("/var/lib/bk/logs"));
    assert_eq!(config.listen_addr.to_string(), "127.0.0.1:8081");
    assert_eq!(config.max_body_bytes, 8 * 1024 * 1024);
}

#[parameterized(
    loopback = { "127.0.0.1:8081" },
    any = { "0.0.0.0:80" },
    ephemeral = { "127.0.0.1:0" },
    ipv6 = { "[::1]:9000" },
)]
fn valid_listen_addrs(raw: &str) {
    assert_eq!(parse_listen_addr(raw).unwrap().to_string(), raw);
}

#[parameterized(
    empty = { "" },
    no_port = { "127.0.0.1" },
    hostname = { "localhost:8081" },
    bad_port = { "127.0.0.1:http" },
)]
fn invalid_listen_addrs(raw: &str) {
    let err = parse_listen_addr(raw).unwrap_err();
    assert!(matches!(err, LifecycleError::InvalidListenAddr(ref s) if s == raw));
}
