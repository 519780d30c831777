//! Request and write contexts handed to formatters.

use axum::http::{header, HeaderMap};

use crate::content::{ContentKind, ScriptValue};
use crate::format::media::{negotiate, Charset, MediaType};

/// What the transport knows about the request being answered.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Media type negotiated for the response, if any.
    pub negotiated_content_type: Option<MediaType>,
    /// Charset used by the text writer when the media type names none.
    pub default_charset: Charset,
}

impl RequestContext {
    pub fn new(negotiated_content_type: Option<MediaType>, default_charset: Charset) -> Self {
        Self {
            negotiated_content_type,
            default_charset,
        }
    }

    /// Negotiate from the request's `Accept` header.
    pub fn from_headers(headers: &HeaderMap, default_charset: Charset) -> Self {
        let negotiated = headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .and_then(negotiate);
        Self::new(negotiated, default_charset)
    }
}

/// Input to a formatter's capability check and write.
#[derive(Debug)]
pub struct WriteContext {
    pub content_type: Option<MediaType>,
    pub kind: ContentKind,
    pub content: ScriptValue,
    pub default_charset: Charset,
}

impl WriteContext {
    pub fn new(request: &RequestContext, content: ScriptValue) -> Self {
        Self {
            content_type: request.negotiated_content_type.clone(),
            kind: content.kind(),
            content,
            default_charset: request.default_charset,
        }
    }

    /// Charset from the negotiated media type, else the default.
    ///
    /// An unknown charset name falls back to the default as well.
    pub fn charset(&self) -> Charset {
        self.content_type
            .as_ref()
            .and_then(|m| m.charset())
            .and_then(|name| name.parse().ok())
            .unwrap_or(self.default_charset)
    }

    /// True when the negotiated type is absent or not textual.
    pub fn accepts_binary(&self) -> bool {
        self.content_type
            .as_ref()
            .map_or(true, |m| !m.is_text_family())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_from_headers_reads_accept() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("text/plain"));
        let request = RequestContext::from_headers(&headers, Charset::Utf8);
        assert_eq!(
            request.negotiated_content_type,
            Some(MediaType::new("text", "plain"))
        );

        let request = RequestContext::from_headers(&HeaderMap::new(), Charset::Latin1);
        assert!(request.negotiated_content_type.is_none());
        assert_eq!(request.default_charset, Charset::Latin1);
    }

    #[test]
    fn test_charset_resolution() {
        let request = RequestContext::new(
            Some("text/plain; charset=utf-16be".parse().unwrap()),
            Charset::Utf8,
        );
        assert_eq!(WriteContext::new(&request, "x".into()).charset(), Charset::Utf16Be);

        let request = RequestContext::new(
            Some("text/plain; charset=klingon".parse().unwrap()),
            Charset::Ascii,
        );
        assert_eq!(WriteContext::new(&request, "x".into()).charset(), Charset::Ascii);

        let request = RequestContext::default();
        assert_eq!(WriteContext::new(&request, "x".into()).charset(), Charset::Utf8);
    }
}
