//! Writer for raw byte content.

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::content::{ContentKind, ScriptValue};
use crate::format::context::WriteContext;
use crate::format::OutputFormatter;
use crate::response::error::ResponseError;

/// Writes bytes unchanged when the negotiated type is binary or absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct BinaryOutputFormatter;

#[async_trait]
impl OutputFormatter for BinaryOutputFormatter {
    fn name(&self) -> &'static str {
        "binary"
    }

    fn can_write(&self, ctx: &WriteContext) -> bool {
        ctx.kind == ContentKind::Bytes && ctx.accepts_binary()
    }

    async fn write(
        &self,
        ctx: WriteContext,
        body: &mut (dyn AsyncWrite + Send + Unpin),
    ) -> Result<u64, ResponseError> {
        let bytes = match ctx.content {
            ScriptValue::Bytes(bytes) => bytes,
            other => other.into_text().into(),
        };
        body.write_all(&bytes).await?;
        Ok(bytes.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::context::RequestContext;
    use bytes::Bytes;

    fn ctx(content_type: Option<&str>) -> WriteContext {
        let request = RequestContext::new(content_type.map(|c| c.parse().unwrap()), Default::default());
        WriteContext::new(&request, ScriptValue::Bytes(Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef])))
    }

    #[test]
    fn test_media_type_gate() {
        assert!(BinaryOutputFormatter.can_write(&ctx(None)));
        assert!(BinaryOutputFormatter.can_write(&ctx(Some("application/octet-stream"))));
        assert!(BinaryOutputFormatter.can_write(&ctx(Some("image/png"))));
        assert!(!BinaryOutputFormatter.can_write(&ctx(Some("text/plain"))));
        assert!(!BinaryOutputFormatter.can_write(&ctx(Some("application/json"))));
    }

    #[tokio::test]
    async fn test_writes_bytes_unchanged() {
        let mut out = Vec::new();
        let written = BinaryOutputFormatter.write(ctx(None), &mut out).await.unwrap();
        assert_eq!(written, 4);
        assert_eq!(out, [0xde, 0xad, 0xbe, 0xef]);
    }
}
