//! The status/headers/content triple produced by a function.

use std::fmt;

use crate::content::ScriptValue;

/// Everything a function returned for its HTTP response.
///
/// Built once per invocation and consumed by `ScriptResponse::execute`.
#[derive(Debug, Default)]
pub struct ResponseDescriptor {
    pub status_code: Option<u16>,
    /// Header pairs in insertion order. Names may repeat; `None` values
    /// render as the empty string.
    pub headers: Option<Vec<(String, Option<String>)>>,
    pub content: ScriptValue,
}

impl ResponseDescriptor {
    pub fn new(status_code: Option<u16>, content: impl Into<ScriptValue>) -> Self {
        Self {
            status_code,
            headers: None,
            content: content.into(),
        }
    }

    pub fn builder() -> ResponseDescriptorBuilder {
        ResponseDescriptorBuilder::default()
    }
}

/// Builder for [`ResponseDescriptor`].
#[derive(Debug, Default)]
pub struct ResponseDescriptorBuilder {
    inner: ResponseDescriptor,
}

impl ResponseDescriptorBuilder {
    pub fn status(mut self, code: u16) -> Self {
        self.inner.status_code = Some(code);
        self
    }

    /// Append a header; the value is stored in its textual form.
    pub fn header(self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.header_opt(name, Some(value))
    }

    /// Append a header whose value may be absent.
    pub fn header_opt<V: fmt::Display>(mut self, name: impl Into<String>, value: Option<V>) -> Self {
        self.inner
            .headers
            .get_or_insert_with(Vec::new)
            .push((name.into(), value.map(|v| v.to_string())));
        self
    }

    pub fn content(mut self, content: impl Into<ScriptValue>) -> Self {
        self.inner.content = content.into();
        self
    }

    pub fn build(self) -> ResponseDescriptor {
        self.inner
    }
}
