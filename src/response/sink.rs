//! Transport seam for response mutation.
//!
//! # Design Decisions
//! - Headers are appended, never inserted, so duplicate names survive
//! - `BufferedResponse` holds the body in memory so the status may be set
//!   after the body has been written without the transport having flushed
//!   anything yet

use axum::body::Body;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tokio::io::AsyncWrite;

/// The mutable side of an HTTP response.
pub trait ResponseSink: Send {
    /// Add a header, keeping any existing values under the same name.
    fn append_header(&mut self, name: HeaderName, value: HeaderValue);

    /// The body stream.
    fn body(&mut self) -> &mut (dyn AsyncWrite + Send + Unpin);

    fn set_status(&mut self, status: StatusCode);
}

/// Response sink that buffers everything and converts into an axum
/// `Response` once writing has finished.
#[derive(Debug, Default)]
pub struct BufferedResponse {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status set so far; `None` means the transport default (200).
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body_bytes(&self) -> &[u8] {
        &self.body
    }

    /// True if nothing has been applied to this response yet.
    pub fn is_untouched(&self) -> bool {
        self.status.is_none() && self.headers.is_empty() && self.body.is_empty()
    }
}

impl ResponseSink for BufferedResponse {
    fn append_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.append(name, value);
    }

    fn body(&mut self) -> &mut (dyn AsyncWrite + Send + Unpin) {
        &mut self.body
    }

    fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }
}

impl IntoResponse for BufferedResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *response.headers_mut() = self.headers;
        response
    }
}
