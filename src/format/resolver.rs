//! Formatter selection with a single text fallback.
//!
//! # Design Decisions
//! - First match wins; declaration order is the only tie-break
//! - Two explicit passes, never recursion: Resolve₁ → [to text → Resolve₂]
//! - The default candidate list is built once and shared read-only

use std::sync::LazyLock;

use crate::content::ScriptValue;
use crate::format::binary::BinaryOutputFormatter;
use crate::format::context::{RequestContext, WriteContext};
use crate::format::stream::StreamOutputFormatter;
use crate::format::text::TextOutputFormatter;
use crate::format::OutputFormatter;
use crate::response::error::ResponseError;

static DEFAULT_RESOLVER: LazyLock<FormatterResolver> = LazyLock::new(|| {
    FormatterResolver::new(vec![
        Box::new(StreamOutputFormatter),
        Box::new(TextOutputFormatter),
        Box::new(BinaryOutputFormatter),
    ])
});

/// A selected formatter plus the context it accepted.
#[derive(Debug)]
pub struct Resolution<'a> {
    pub formatter: &'a dyn OutputFormatter,
    pub context: WriteContext,
    /// Whether the content had to be coerced to text first.
    pub fell_back: bool,
}

/// Ordered list of writer strategies.
#[derive(Debug)]
pub struct FormatterResolver {
    formatters: Vec<Box<dyn OutputFormatter>>,
}

impl FormatterResolver {
    pub fn new(formatters: Vec<Box<dyn OutputFormatter>>) -> Self {
        Self { formatters }
    }

    /// The process-wide stream, text, binary list.
    pub fn default_set() -> &'static FormatterResolver {
        &DEFAULT_RESOLVER
    }

    /// Formatter names in priority order.
    pub fn names(&self) -> Vec<&'static str> {
        self.formatters.iter().map(|f| f.name()).collect()
    }

    fn select(&self, ctx: &WriteContext) -> Option<&dyn OutputFormatter> {
        self.formatters
            .iter()
            .find(|f| f.can_write(ctx))
            .map(|f| f.as_ref())
    }

    /// Pick a formatter for `content`, coercing it to text once if nothing
    /// accepts it as-is.
    pub fn resolve(
        &self,
        request: &RequestContext,
        content: ScriptValue,
    ) -> Result<Resolution<'_>, ResponseError> {
        let context = WriteContext::new(request, content);
        if let Some(formatter) = self.select(&context) {
            return Ok(Resolution {
                formatter,
                context,
                fell_back: false,
            });
        }

        let original_kind = context.kind.clone();
        let text = context.content.into_text();
        let context = WriteContext::new(request, ScriptValue::Text(text));
        match self.select(&context) {
            Some(formatter) => {
                tracing::debug!(
                    kind = %original_kind,
                    formatter = formatter.name(),
                    "No formatter for content, fell back to text"
                );
                Ok(Resolution {
                    formatter,
                    context,
                    fell_back: true,
                })
            }
            None => Err(ResponseError::Resolution {
                kind: original_kind,
                content_type: request.negotiated_content_type.as_ref().map(|m| m.to_string()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentKind, ContentStream, DynamicObject, ScriptObject};
    use std::fmt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug)]
    struct Invoice(u32);

    impl fmt::Display for Invoice {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "invoice #{}", self.0)
        }
    }

    impl ScriptObject for Invoice {
        fn type_name(&self) -> &str {
            "Invoice"
        }
    }

    /// Counts capability checks and accepts everything.
    #[derive(Debug, Default)]
    struct Greedy {
        checks: Arc<AtomicUsize>,
        label: &'static str,
    }

    #[async_trait::async_trait]
    impl OutputFormatter for Greedy {
        fn name(&self) -> &'static str {
            self.label
        }

        fn can_write(&self, _ctx: &WriteContext) -> bool {
            self.checks.fetch_add(1, Ordering::SeqCst);
            true
        }

        async fn write(
            &self,
            _ctx: WriteContext,
            _body: &mut (dyn tokio::io::AsyncWrite + Send + Unpin),
        ) -> Result<u64, ResponseError> {
            Ok(0)
        }
    }

    fn request(accept: Option<&str>) -> RequestContext {
        RequestContext::new(accept.map(|a| a.parse().unwrap()), Default::default())
    }

    #[test]
    fn test_default_order_is_stream_text_binary() {
        assert_eq!(
            FormatterResolver::default_set().names(),
            vec!["stream", "text", "binary"]
        );
    }

    #[test]
    fn test_stream_selected_without_fallback() {
        for accept in [None, Some("text/plain"), Some("application/octet-stream")] {
            let content = ContentStream::from_bytes("data").into();
            let resolution = FormatterResolver::default_set()
                .resolve(&request(accept), content)
                .unwrap();
            assert_eq!(resolution.formatter.name(), "stream");
            assert!(!resolution.fell_back);
        }
    }

    #[test]
    fn test_text_and_bytes_select_directly() {
        let resolver = FormatterResolver::default_set();

        let resolution = resolver.resolve(&request(None), "hello".into()).unwrap();
        assert_eq!(resolution.formatter.name(), "text");
        assert!(!resolution.fell_back);

        let resolution = resolver.resolve(&request(None), vec![1u8, 2].into()).unwrap();
        assert_eq!(resolution.formatter.name(), "binary");
        assert!(!resolution.fell_back);
    }

    #[test]
    fn test_custom_object_falls_back_to_text_once() {
        let resolution = FormatterResolver::default_set()
            .resolve(&request(Some("text/plain")), ScriptValue::Object(Box::new(Invoice(7))))
            .unwrap();
        assert_eq!(resolution.formatter.name(), "text");
        assert!(resolution.fell_back);
        assert_eq!(resolution.context.kind, ContentKind::Text);
        assert_eq!(resolution.context.content.into_text(), "invoice #7");
    }

    #[test]
    fn test_null_falls_back_to_empty_text() {
        let resolution = FormatterResolver::default_set()
            .resolve(&request(None), ScriptValue::Null)
            .unwrap();
        assert_eq!(resolution.formatter.name(), "text");
        assert!(resolution.fell_back);
        assert_eq!(resolution.context.content.into_text(), "");
    }

    #[test]
    fn test_bytes_under_text_media_type_fall_back() {
        let resolution = FormatterResolver::default_set()
            .resolve(&request(Some("text/plain")), b"plain bytes".to_vec().into())
            .unwrap();
        assert_eq!(resolution.formatter.name(), "text");
        assert!(resolution.fell_back);
        assert_eq!(resolution.context.content.into_text(), "plain bytes");
    }

    #[test]
    fn test_unnormalized_dynamic_falls_back_to_json_text() {
        let obj: DynamicObject = [("a", 1)].into_iter().collect();
        let resolution = FormatterResolver::default_set()
            .resolve(&request(None), obj.into())
            .unwrap();
        assert!(resolution.fell_back);
        assert_eq!(resolution.context.content.into_text(), r#"{"a":1}"#);
    }

    #[test]
    fn test_first_acceptor_wins() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let resolver = FormatterResolver::new(vec![
            Box::new(Greedy { checks: first.clone(), label: "first" }),
            Box::new(Greedy { checks: second.clone(), label: "second" }),
        ]);

        let resolution = resolver.resolve(&request(None), "x".into()).unwrap();
        assert_eq!(resolution.formatter.name(), "first");
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_missing_text_writer_is_resolution_fault() {
        let resolver = FormatterResolver::new(vec![
            Box::new(StreamOutputFormatter),
            Box::new(BinaryOutputFormatter),
        ]);

        let err = resolver
            .resolve(&request(Some("text/plain")), ScriptValue::Object(Box::new(Invoice(1))))
            .unwrap_err();
        match err {
            ResponseError::Resolution { kind, content_type } => {
                assert_eq!(kind, ContentKind::Object("Invoice".into()));
                assert_eq!(content_type.as_deref(), Some("text/plain"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
