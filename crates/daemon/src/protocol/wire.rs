// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reading and writing HTTP/1.1 messages on a byte stream.
//!
//! Both directions use Content-Length framing and never depend on
//! connection close for EOF.

use super::{Method, Request, Response, StatusCode};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Cap on the request line plus all header lines.
pub const MAX_HEADER_BYTES: usize = 16 * 1024;

/// Cap on the number of header fields.
pub const MAX_HEADERS: usize = 64;

/// Errors raised while framing a request or response
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("connection closed")]
    ConnectionClosed,

    #[error("timed out reading request")]
    Timeout,

    #[error("malformed request: {0}")]
    Malformed(String),

    #[error("content-length required")]
    LengthRequired,

    #[error("body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("request head too large")]
    HeadersTooLarge,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProtocolError {
    /// Status to answer with, or `None` when the peer is already gone.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ProtocolError::ConnectionClosed | ProtocolError::Io(_) => None,
            ProtocolError::Timeout => Some(StatusCode::REQUEST_TIMEOUT),
            ProtocolError::Malformed(_) => Some(StatusCode::BAD_REQUEST),
            ProtocolError::LengthRequired => Some(StatusCode::LENGTH_REQUIRED),
            ProtocolError::BodyTooLarge { .. } => Some(StatusCode::PAYLOAD_TOO_LARGE),
            ProtocolError::HeadersTooLarge => Some(StatusCode::HEADERS_TOO_LARGE),
        }
    }
}

/// Read one request. Bodies longer than `max_body` are refused before
/// any of the body is read.
pub async fn read_request<R>(reader: &mut R, max_body: usize) -> Result<Request, ProtocolError>
where
    R: AsyncBufRead + Unpin,
{
    let mut budget = MAX_HEADER_BYTES as u64;

    let request_line = match read_head_line(reader, &mut budget).await? {
        Some(line) => line,
        None => return Err(ProtocolError::ConnectionClosed),
    };

    let mut parts = request_line.split_whitespace();
    let (method, target, version) = match (parts.next(), parts.next(), parts.next(), parts.next())
    {
        (Some(m), Some(t), Some(v), None) => (m, t, v),
        _ => return Err(ProtocolError::Malformed(format!("request line {:?}", request_line))),
    };
    if !version.starts_with("HTTP/1.") {
        return Err(ProtocolError::Malformed(format!("unsupported version {:?}", version)));
    }
    if !target.starts_with('/') {
        return Err(ProtocolError::Malformed(format!("request target {:?}", target)));
    }

    let mut request = Request::new(Method::parse(method), target);

    loop {
        let line = read_head_line(reader, &mut budget)
            .await?
            .ok_or_else(|| ProtocolError::Malformed("unterminated headers".to_string()))?;
        if line.is_empty() {
            break;
        }
        if request.headers.len() >= MAX_HEADERS {
            return Err(ProtocolError::HeadersTooLarge);
        }
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| ProtocolError::Malformed(format!("header line {:?}", line)))?;
        request.headers.push((name.trim().to_ascii_lowercase(), value.trim().to_string()));
    }

    if request.header("transfer-encoding").is_some() {
        return Err(ProtocolError::LengthRequired);
    }

    let content_length = match request.header("content-length") {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| ProtocolError::Malformed(format!("content-length {:?}", raw)))?,
        None if matches!(request.method, Method::Put | Method::Post) => {
            return Err(ProtocolError::LengthRequired)
        }
        None => 0,
    };

    if content_length > max_body {
        return Err(ProtocolError::BodyTooLarge { limit: max_body });
    }

    if content_length > 0 {
        let mut body = vec![0u8; content_length];
        reader.read_exact(&mut body).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::UnexpectedEof => ProtocolError::ConnectionClosed,
            _ => ProtocolError::Io(e),
        })?;
        request.body = body;
    }

    Ok(request)
}

/// Read a CRLF (or bare LF) terminated line of the request head,
/// charging it against `budget`. `None` means EOF before any byte.
async fn read_head_line<R>(
    reader: &mut R,
    budget: &mut u64,
) -> Result<Option<String>, ProtocolError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    let n = (&mut *reader).take(*budget).read_until(b'\n', &mut buf).await?;
    *budget -= n as u64;

    if !buf.ends_with(b"\n") {
        if *budget == 0 {
            return Err(ProtocolError::HeadersTooLarge);
        }
        if n == 0 {
            return Ok(None);
        }
        return Err(ProtocolError::ConnectionClosed);
    }

    buf.pop();
    if buf.ends_with(b"\r") {
        buf.pop();
    }
    String::from_utf8(buf)
        .map(Some)
        .map_err(|_| ProtocolError::Malformed("non-utf8 request head".to_string()))
}

/// Write a response and flush. Every response closes the connection.
pub async fn write_response<W>(writer: &mut W, response: &Response) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status.as_u16(),
        response.status.reason(),
        response.content_type,
        response.body.len()
    );
    writer.write_all(head.as_bytes()).await?;
    writer.write_all(&response.body).await?;
    writer.flush().await?;
    Ok(())
}

/// Client side: write a request with a Content-Length framed body.
pub async fn write_request<W>(
    writer: &mut W,
    method: &Method,
    target: &str,
    body: &[u8],
) -> Result<(), ProtocolError>
where
    W: AsyncWrite + Unpin,
{
    let head = format!(
        "{} {} HTTP/1.1\r\nHost: localhost\r\nContent-Length: {}\r\n\r\n",
        method,
        target,
        body.len()
    );
    writer.write_all(head.as_bytes()).await?;
    writer.write_all(body).await?;
    writer.flush().await?;
    Ok(())
}

/// Client side: read a response status and body.
pub async fn read_response<R>(reader: &mut R) -> Result<(StatusCode, Vec<u8>), ProtocolError>
where
    R: AsyncBufRead + Unpin,
{
    let mut status_line = String::new();
    if reader.read_line(&mut status_line).await? == 0 {
        return Err(ProtocolError::ConnectionClosed);
    }
    let status = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse::<u16>().ok())
        .map(StatusCode)
        .ok_or_else(|| ProtocolError::Malformed(format!("status line {:?}", status_line)))?;

    let mut content_length: usize = 0;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).await?;
        if line == "\r\n" || line.is_empty() {
            break;
        }
        let line_lower = line.to_ascii_lowercase();
        if let Some(val) = line_lower.strip_prefix("content-length:") {
            content_length = val
                .trim()
                .parse()
                .map_err(|_| ProtocolError::Malformed(format!("content-length {:?}", val)))?;
        }
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).await?;
    Ok((status, body))
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
