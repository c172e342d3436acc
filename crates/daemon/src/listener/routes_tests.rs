// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

fn job(job: &str) -> Option<Route> {
    Some(Route::Job { job: job.to_string() })
}

fn build(job: &str, build: &str) -> Option<Route> {
    Some(Route::Build { job: job.to_string(), build: build.to_string() })
}

fn build_log(job: &str, build: &str) -> Option<Route> {
    Some(Route::BuildLog { job: job.to_string(), build: build.to_string() })
}

#[parameterized(
    job_only = { "/builds/build-app", job("build-app") },
    job_and_build = { "/builds/build-app/42", build("build-app", "42") },
    unparsed_build = { "/builds/build-app/abc", build("build-app", "abc") },
    log = { "/builds/build-app/42/log", build_log("build-app", "42") },
    encoded_job = { "/builds/my%20job/7", build("my job", "7") },
    encoded_slash = { "/builds/a%2Fb/7", build("a/b", "7") },
    unicode = { "/builds/%C3%A9t%C3%A9/1", build("été", "1") },
)]
fn parses_routes(path: &str, expected: Option<Route>) {
    assert_eq!(Route::parse(path), expected);
}

#[parameterized(
    root = { "/" },
    bare_collection = { "/builds" },
    collection_slash = { "/builds/" },
    trailing_slash = { "/builds/build-app/" },
    empty_middle = { "/builds//42" },
    unknown_prefix = { "/jobs/build-app/42" },
    unknown_tail = { "/builds/build-app/42/artifacts" },
    too_deep = { "/builds/build-app/42/log/extra" },
    truncated_escape = { "/builds/a%2/1" },
    bad_hex = { "/builds/a%zz/1" },
    signed_hex = { "/builds/a%+1/1" },
    invalid_utf8 = { "/builds/%FF/1" },
)]
fn rejects_paths(path: &str) {
    assert_eq!(Route::parse(path), None);
}
