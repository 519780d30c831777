//! Writer for string content.

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::content::{ContentKind, ScriptValue};
use crate::format::context::WriteContext;
use crate::format::OutputFormatter;
use crate::response::error::ResponseError;

/// Encodes text with the negotiated charset (UTF-8 unless told otherwise).
///
/// Accepts text under every media type, so a textual write context always
/// has a writer. The media type only picks the charset.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextOutputFormatter;

#[async_trait]
impl OutputFormatter for TextOutputFormatter {
    fn name(&self) -> &'static str {
        "text"
    }

    fn can_write(&self, ctx: &WriteContext) -> bool {
        ctx.kind == ContentKind::Text
    }

    async fn write(
        &self,
        ctx: WriteContext,
        body: &mut (dyn AsyncWrite + Send + Unpin),
    ) -> Result<u64, ResponseError> {
        let charset = ctx.charset();
        let text = match ctx.content {
            ScriptValue::Text(text) => text,
            other => other.into_text(),
        };
        if text.is_empty() {
            return Ok(0);
        }

        let encoded = charset.encode(&text);
        body.write_all(&encoded).await?;
        Ok(encoded.len() as u64)
    }
}
