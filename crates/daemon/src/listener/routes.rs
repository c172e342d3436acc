// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request routing.

use bk_wire::ErrorBody;

use super::builds;
use super::ListenCtx;
use crate::protocol::{Method, Request, Response, StatusCode};

/// A recognized resource path. Path segments are percent-decoded; the
/// build segment is left unparsed so handlers can report it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Route {
    /// `/builds/{job}`
    Job { job: String },
    /// `/builds/{job}/{build}`
    Build { job: String, build: String },
    /// `/builds/{job}/{build}/log`
    BuildLog { job: String, build: String },
}

impl Route {
    pub(crate) fn parse(path: &str) -> Option<Route> {
        let rest = path.strip_prefix("/builds/")?;
        let segments = rest.split('/').map(percent_decode).collect::<Option<Vec<_>>>()?;
        if segments.iter().any(|s| s.is_empty()) {
            return None;
        }

        let mut segments = segments.into_iter();
        let route = match (segments.next(), segments.next(), segments.next(), segments.next()) {
            (Some(job), None, None, None) => Route::Job { job },
            (Some(job), Some(build), None, None) => Route::Build { job, build },
            (Some(job), Some(build), Some(tail), None) if tail == "log" => {
                Route::BuildLog { job, build }
            }
            _ => return None,
        };
        Some(route)
    }
}

/// Decode `%XX` escapes. `None` for truncated escapes or non-UTF-8 results.
fn percent_decode(segment: &str) -> Option<String> {
    if !segment.contains('%') {
        return Some(segment.to_string());
    }
    let bytes = segment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = segment.get(i + 1..i + 3)?;
            if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

pub(crate) async fn dispatch(request: &Request, ctx: &ListenCtx) -> Response {
    let Some(route) = Route::parse(request.path()) else {
        return Response::json(StatusCode::NOT_FOUND, &ErrorBody::new("not found"));
    };

    match (&request.method, &route) {
        (Method::Put, Route::Build { job, build }) => {
            builds::put_report(ctx, job, build, &request.body).await
        }
        (Method::Get, Route::Build { job, build }) => builds::get_build(ctx, job, build).await,
        (Method::Get, Route::Job { job }) => builds::list_builds(ctx, job).await,
        (Method::Post, Route::Job { job }) => builds::create_build(ctx, job).await,
        (Method::Get, Route::BuildLog { job, build }) => builds::get_log(ctx, job, build).await,
        (Method::Put, Route::BuildLog { job, build }) => {
            builds::put_log(ctx, job, build, &request.body).await
        }
        (method, _) => Response::json(
            StatusCode::METHOD_NOT_ALLOWED,
            &ErrorBody::new(format!("method {} not allowed", method)),
        ),
    }
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
