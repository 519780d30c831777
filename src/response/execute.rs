//! Writes a `ResponseDescriptor` through a `ResponseSink`.
//!
//! Mutation order is fixed: headers, then the body (fully awaited), then
//! the status code. Everything that can fail on user data (header parsing,
//! status range, dynamic serialization) and formatter resolution runs
//! before the first mutation, so a failed call leaves the sink untouched.

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use tokio::io::AsyncWriteExt;

use crate::content::normalize;
use crate::format::{FormatterResolver, RequestContext};
use crate::response::descriptor::ResponseDescriptor;
use crate::response::error::{ResponseError, ResponseResult};
use crate::response::sink::{BufferedResponse, ResponseSink};

/// Executes descriptors against a formatter list.
#[derive(Debug, Clone, Copy)]
pub struct ScriptResponse<'a> {
    resolver: &'a FormatterResolver,
}

impl Default for ScriptResponse<'static> {
    fn default() -> Self {
        Self::new(FormatterResolver::default_set())
    }
}

impl<'a> ScriptResponse<'a> {
    pub fn new(resolver: &'a FormatterResolver) -> Self {
        Self { resolver }
    }

    /// Apply `descriptor` to `sink`.
    ///
    /// Fails with a resolution fault, a write I/O fault, or a validation
    /// error raised before anything was written.
    pub async fn execute<S: ResponseSink + ?Sized>(
        &self,
        request: &RequestContext,
        descriptor: ResponseDescriptor,
        sink: &mut S,
    ) -> ResponseResult<()> {
        let ResponseDescriptor {
            status_code,
            headers,
            content,
        } = descriptor;

        let headers = parse_headers(headers.unwrap_or_default())?;
        let status = status_code
            .map(|code| StatusCode::from_u16(code).map_err(|_| ResponseError::InvalidStatus(code)))
            .transpose()?;
        let content = normalize(content)?;
        let resolution = self.resolver.resolve(request, content)?;

        for (name, value) in headers {
            sink.append_header(name, value);
        }

        let formatter = resolution.formatter;
        let kind = resolution.context.kind.clone();
        let body = sink.body();
        let written = formatter.write(resolution.context, body).await?;
        body.flush().await?;

        tracing::debug!(
            formatter = formatter.name(),
            kind = %kind,
            fell_back = resolution.fell_back,
            bytes = written,
            "Response body written"
        );

        if let Some(status) = status {
            sink.set_status(status);
        }
        Ok(())
    }
}

fn parse_headers(
    headers: Vec<(String, Option<String>)>,
) -> ResponseResult<Vec<(HeaderName, HeaderValue)>> {
    headers
        .into_iter()
        .map(|(name, value)| {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                ResponseError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            let header_value = HeaderValue::try_from(value.unwrap_or_default()).map_err(|e| {
                ResponseError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            Ok((header_name, header_value))
        })
        .collect()
}

/// Render `descriptor` into an axum response with the default formatters.
///
/// Any failure yields a bare 500; the partially built response is dropped.
pub async fn render(request: &RequestContext, descriptor: ResponseDescriptor) -> Response {
    let mut sink = BufferedResponse::new();
    match ScriptResponse::default()
        .execute(request, descriptor, &mut sink)
        .await
    {
        Ok(()) => sink.into_response(),
        Err(e) => {
            if e.is_internal() {
                tracing::error!(error = %e, "Response resolution fault");
            } else {
                tracing::warn!(error = %e, "Failed to write script response");
            }
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
