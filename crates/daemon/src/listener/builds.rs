// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build resource handlers.

use bk_core::BuildId;
use bk_storage::StoreError;
use bk_wire::ErrorBody;
use tracing::{info, warn};

use super::ListenCtx;
use crate::protocol::{Response, StatusCode};

/// `PUT /builds/{job}/{build}`: apply an agent status report.
pub(super) async fn put_report(ctx: &ListenCtx, job: &str, build: &str, body: &[u8]) -> Response {
    match ctx.reconciler.reconcile_raw(job, build, body).await {
        Ok(outcome) if outcome.is_complete() => Response::json(StatusCode::OK, &outcome.to_body()),
        Ok(outcome) => Response::json(StatusCode::INTERNAL_SERVER_ERROR, &outcome.to_body()),
        Err(e) if e.is_client_error() => {
            info!(job, build, error = %e, "rejected report");
            Response::json(StatusCode::BAD_REQUEST, &ErrorBody::new(&e))
        }
        Err(e) => Response::json(StatusCode::INTERNAL_SERVER_ERROR, &ErrorBody::new(&e)),
    }
}

/// `GET /builds/{job}/{build}`
pub(super) async fn get_build(ctx: &ListenCtx, job: &str, build: &str) -> Response {
    let id = match parse_id(build) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match ctx.store().get_build(job, id).await {
        Ok(build) => Response::json(StatusCode::OK, &build),
        Err(e) => store_error(e),
    }
}

/// `GET /builds/{job}`
pub(super) async fn list_builds(ctx: &ListenCtx, job: &str) -> Response {
    match ctx.store().builds(job).await {
        Ok(builds) => Response::json(StatusCode::OK, &builds),
        Err(e) => store_error(e),
    }
}

/// `POST /builds/{job}`
pub(super) async fn create_build(ctx: &ListenCtx, job: &str) -> Response {
    match ctx.store().create_build(job).await {
        Ok(build) => {
            info!(job, build = %build.id, "created build");
            Response::json(StatusCode::OK, &build)
        }
        Err(e) => store_error(e),
    }
}

/// `GET /builds/{job}/{build}/log`
pub(super) async fn get_log(ctx: &ListenCtx, job: &str, build: &str) -> Response {
    let id = match parse_id(build) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match ctx.store().build_log(job, id).await {
        Ok(log) => Response::bytes(StatusCode::OK, log),
        Err(e) => store_error(e),
    }
}

/// `PUT /builds/{job}/{build}/log`: replace the stored log.
pub(super) async fn put_log(ctx: &ListenCtx, job: &str, build: &str, body: &[u8]) -> Response {
    let id = match parse_id(build) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match ctx.store().save_build_log(job, id, body).await {
        Ok(()) => Response::empty(StatusCode::OK),
        Err(e) => store_error(e),
    }
}

fn parse_id(build: &str) -> Result<BuildId, Response> {
    build
        .parse::<BuildId>()
        .map_err(|e| Response::json(StatusCode::BAD_REQUEST, &ErrorBody::new(e)))
}

fn store_error(e: StoreError) -> Response {
    match e {
        StoreError::BuildNotFound { .. } => {
            Response::json(StatusCode::NOT_FOUND, &ErrorBody::new(&e))
        }
        StoreError::Unavailable(_) | StoreError::IdsExhausted { .. } => {
            warn!(error = %e, "store request failed");
            Response::json(StatusCode::INTERNAL_SERVER_ERROR, &ErrorBody::new(&e))
        }
    }
}
