// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP/1.1 framing for the status-report API.
//!
//! One request per connection. Bodies are framed by `Content-Length`;
//! chunked transfer encoding is refused.

mod request;
mod response;
mod wire;

pub use request::{Method, Request};
pub use response::{Response, StatusCode};
pub use wire::{read_request, read_response, write_request, write_response, ProtocolError};
pub use wire::{MAX_HEADER_BYTES, MAX_HEADERS};
