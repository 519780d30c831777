//! Writer for stream content.

use async_trait::async_trait;
use tokio::io::AsyncWrite;

use crate::content::{ContentKind, ScriptValue};
use crate::format::context::WriteContext;
use crate::format::OutputFormatter;
use crate::response::error::ResponseError;

/// Copies a `ContentStream` to the body. Accepts any media type.
#[derive(Debug, Default, Clone, Copy)]
pub struct StreamOutputFormatter;

#[async_trait]
impl OutputFormatter for StreamOutputFormatter {
    fn name(&self) -> &'static str {
        "stream"
    }

    fn can_write(&self, ctx: &WriteContext) -> bool {
        ctx.kind == ContentKind::Stream
    }

    async fn write(
        &self,
        ctx: WriteContext,
        body: &mut (dyn AsyncWrite + Send + Unpin),
    ) -> Result<u64, ResponseError> {
        let ScriptValue::Stream(mut stream) = ctx.content else {
            return Err(ResponseError::Resolution {
                kind: ctx.kind,
                content_type: ctx.content_type.map(|m| m.to_string()),
            });
        };
        let written = tokio::io::copy(stream.reader(), body).await?;
        Ok(written)
    }
}
