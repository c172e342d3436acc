// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener task for the HTTP API.
//!
//! The Listener runs in a spawned task, accepting TCP connections and
//! handling each in its own task. Handlers talk to the store only through
//! the reconciler, so concurrent reports for different builds never wait
//! on each other here.

mod builds;
mod routes;

use std::sync::Arc;
use std::time::Duration;

use bk_engine::Reconciler;
use bk_storage::BuildStore;
use bk_wire::ErrorBody;
use tokio::io::BufReader;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::protocol::{self, ProtocolError, Response};

/// Shared context for all request handlers.
pub struct ListenCtx {
    pub reconciler: Reconciler<Arc<dyn BuildStore>>,
    pub max_body_bytes: usize,
    /// Deadline for reading one complete request
    pub request_timeout: Duration,
}

impl ListenCtx {
    pub fn new(
        store: Arc<dyn BuildStore>,
        max_body_bytes: usize,
        request_timeout: Duration,
    ) -> Self {
        Self { reconciler: Reconciler::new(store), max_body_bytes, request_timeout }
    }

    fn store(&self) -> &dyn BuildStore {
        self.reconciler.store().as_ref()
    }
}

/// Listener task for accepting HTTP connections.
pub struct Listener {
    tcp: TcpListener,
    ctx: Arc<ListenCtx>,
}

impl Listener {
    pub fn new(tcp: TcpListener, ctx: Arc<ListenCtx>) -> Self {
        Self { tcp, ctx }
    }

    /// Run the accept loop until `shutdown` fires, spawning a task per connection.
    ///
    /// Connections already accepted finish on their own tasks.
    pub async fn run(self, shutdown: CancellationToken) {
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("listener stopped");
                    break;
                }
                result = self.tcp.accept() => {
                    match result {
                        Ok((stream, addr)) => {
                            debug!(%addr, "connection accepted");
                            let ctx = Arc::clone(&self.ctx);
                            tokio::spawn(async move {
                                if let Err(e) = handle_connection(stream, &ctx).await {
                                    log_connection_error(e);
                                }
                            });
                        }
                        Err(e) => error!("TCP accept error: {}", e),
                    }
                }
            }
        }
    }
}

fn log_connection_error(e: ProtocolError) {
    match e {
        ProtocolError::ConnectionClosed => debug!("Client disconnected"),
        ProtocolError::Timeout => warn!("Connection timeout"),
        ProtocolError::Io(_) => error!("Connection error: {}", e),
        _ => debug!("Rejected request: {}", e),
    }
}

/// Handle a single connection: read one request, answer it, close.
async fn handle_connection(stream: TcpStream, ctx: &ListenCtx) -> Result<(), ProtocolError> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);

    let read = protocol::read_request(&mut reader, ctx.max_body_bytes);
    let result = match tokio::time::timeout(ctx.request_timeout, read).await {
        Ok(result) => result,
        Err(_) => Err(ProtocolError::Timeout),
    };

    let request = match result {
        Ok(request) => request,
        Err(e) => {
            if let Some(status) = e.status() {
                let response = Response::json(status, &ErrorBody::new(&e));
                let _ = protocol::write_response(&mut writer, &response).await;
            }
            return Err(e);
        }
    };

    let response = routes::dispatch(&request, ctx).await;
    debug!(
        method = %request.method,
        path = request.path(),
        status = response.status.as_u16(),
        "handled request"
    );

    protocol::write_response(&mut writer, &response).await
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
