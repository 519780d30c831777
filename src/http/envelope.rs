//! JSON envelope describing a function result for the preview server.

use serde::Deserialize;
use serde_json::Value;

use crate::content::{ContentStream, ScriptValue};
use crate::response::ResponseDescriptor;

/// `POST /render` request body.
///
/// ```json
/// { "status": 404, "headers": [["X-Id", 7], ["X-Empty", null]], "body": "not found" }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenderEnvelope {
    pub status: Option<u16>,
    pub headers: Option<Vec<(String, Option<Value>)>>,
    /// Any JSON value; objects become dynamic content.
    pub body: Value,
    /// Raw bytes; takes precedence over `body`.
    pub body_bytes: Option<Vec<u8>>,
    /// Text served through a stream; takes precedence over everything else.
    pub body_stream: Option<String>,
}

impl RenderEnvelope {
    pub fn into_descriptor(self) -> ResponseDescriptor {
        let content = if let Some(text) = self.body_stream {
            ScriptValue::Stream(ContentStream::from_bytes(text))
        } else if let Some(bytes) = self.body_bytes {
            ScriptValue::from(bytes)
        } else {
            ScriptValue::from_json(self.body)
        };

        let headers = self.headers.map(|headers| {
            headers
                .into_iter()
                .map(|(name, value)| (name, value.map(header_text)))
                .collect()
        });

        ResponseDescriptor {
            status_code: self.status,
            headers,
            content,
        }
    }
}

fn header_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
