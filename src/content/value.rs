//! Runtime shapes of values returned by script functions.

use std::fmt;
use std::pin::Pin;

use bytes::Bytes;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use tokio::io::AsyncRead;

/// A custom runtime type with no dedicated writer.
///
/// `Display` is its textual representation; the resolver falls back to it
/// when no formatter accepts the object as-is.
pub trait ScriptObject: fmt::Display + fmt::Debug + Send + Sync {
    /// Name reported in logs and resolution faults.
    fn type_name(&self) -> &str;
}

/// Async byte source returned by a function.
pub struct ContentStream {
    inner: Pin<Box<dyn AsyncRead + Send>>,
}

impl ContentStream {
    pub fn new(reader: impl AsyncRead + Send + 'static) -> Self {
        Self {
            inner: Box::pin(reader),
        }
    }

    /// In-memory stream over `bytes`.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self::new(std::io::Cursor::new(bytes.into()))
    }

    pub(crate) fn reader(&mut self) -> &mut Pin<Box<dyn AsyncRead + Send>> {
        &mut self.inner
    }
}

impl fmt::Debug for ContentStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ContentStream { .. }")
    }
}

/// Schema-less key/value object. Keys keep their insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DynamicObject(Map<String, Value>);

impl DynamicObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a member, replacing any previous value under `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for DynamicObject {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for DynamicObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Declared type of a content value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentKind {
    Stream,
    Text,
    Bytes,
    Dynamic,
    Number,
    Bool,
    Object(String),
    None,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Stream => f.write_str("stream"),
            ContentKind::Text => f.write_str("text"),
            ContentKind::Bytes => f.write_str("bytes"),
            ContentKind::Dynamic => f.write_str("dynamic"),
            ContentKind::Number => f.write_str("number"),
            ContentKind::Bool => f.write_str("bool"),
            ContentKind::Object(name) => write!(f, "object({name})"),
            ContentKind::None => f.write_str("null"),
        }
    }
}

/// A value returned by a script function, of unknown static type.
#[derive(Debug, Default)]
pub enum ScriptValue {
    Stream(ContentStream),
    Text(String),
    Bytes(Bytes),
    Dynamic(DynamicObject),
    Number(Number),
    Bool(bool),
    Object(Box<dyn ScriptObject>),
    #[default]
    Null,
}

impl ScriptValue {
    pub fn kind(&self) -> ContentKind {
        match self {
            ScriptValue::Stream(_) => ContentKind::Stream,
            ScriptValue::Text(_) => ContentKind::Text,
            ScriptValue::Bytes(_) => ContentKind::Bytes,
            ScriptValue::Dynamic(_) => ContentKind::Dynamic,
            ScriptValue::Number(_) => ContentKind::Number,
            ScriptValue::Bool(_) => ContentKind::Bool,
            ScriptValue::Object(obj) => ContentKind::Object(obj.type_name().to_string()),
            ScriptValue::Null => ContentKind::None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ScriptValue::Null)
    }

    /// Textual representation used by the fallback path.
    ///
    /// Null becomes the empty string. A stream has no text form and renders
    /// as its kind name.
    pub fn into_text(self) -> String {
        match self {
            ScriptValue::Text(s) => s,
            ScriptValue::Bytes(b) => String::from_utf8_lossy(&b).into_owned(),
            ScriptValue::Dynamic(obj) => Value::Object(obj.0).to_string(),
            ScriptValue::Number(n) => n.to_string(),
            ScriptValue::Bool(b) => b.to_string(),
            ScriptValue::Object(obj) => obj.to_string(),
            ScriptValue::Stream(_) => ContentKind::Stream.to_string(),
            ScriptValue::Null => String::new(),
        }
    }

    /// Map a JSON value onto the closest script shape.
    ///
    /// Objects become dynamic maps. Arrays have no dedicated shape and are
    /// carried as opaque objects rendering to compact JSON.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => ScriptValue::Null,
            Value::Bool(b) => ScriptValue::Bool(b),
            Value::Number(n) => ScriptValue::Number(n),
            Value::String(s) => ScriptValue::Text(s),
            Value::Object(map) => ScriptValue::Dynamic(DynamicObject(map)),
            Value::Array(items) => ScriptValue::Object(Box::new(JsonArray(items))),
        }
    }
}

impl From<String> for ScriptValue {
    fn from(s: String) -> Self {
        ScriptValue::Text(s)
    }
}

impl From<&str> for ScriptValue {
    fn from(s: &str) -> Self {
        ScriptValue::Text(s.to_string())
    }
}

impl From<Bytes> for ScriptValue {
    fn from(b: Bytes) -> Self {
        ScriptValue::Bytes(b)
    }
}

impl From<Vec<u8>> for ScriptValue {
    fn from(b: Vec<u8>) -> Self {
        ScriptValue::Bytes(Bytes::from(b))
    }
}

impl From<DynamicObject> for ScriptValue {
    fn from(obj: DynamicObject) -> Self {
        ScriptValue::Dynamic(obj)
    }
}

impl From<ContentStream> for ScriptValue {
    fn from(stream: ContentStream) -> Self {
        ScriptValue::Stream(stream)
    }
}

/// JSON array carried as an opaque object.
#[derive(Debug)]
struct JsonArray(Vec<Value>);

impl fmt::Display for JsonArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        f.write_str("[")?;
        for item in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            first = false;
            write!(f, "{item}")?;
        }
        f.write_str("]")
    }
}

impl ScriptObject for JsonArray {
    fn type_name(&self) -> &str {
        "array"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct Point {
        x: i32,
        y: i32,
    }

    impl fmt::Display for Point {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "({}, {})", self.x, self.y)
        }
    }

    impl ScriptObject for Point {
        fn type_name(&self) -> &str {
            "Point"
        }
    }

    #[test]
    fn test_kind_of_each_shape() {
        assert_eq!(ScriptValue::from("hi").kind(), ContentKind::Text);
        assert_eq!(ScriptValue::from(vec![1u8]).kind(), ContentKind::Bytes);
        assert_eq!(ScriptValue::Null.kind(), ContentKind::None);
        assert_eq!(
            ScriptValue::Object(Box::new(Point { x: 1, y: 2 })).kind(),
            ContentKind::Object("Point".into())
        );
        assert_eq!(
            ScriptValue::from(ContentStream::from_bytes("abc")).kind(),
            ContentKind::Stream
        );
    }

    #[test]
    fn test_into_text() {
        assert_eq!(ScriptValue::Null.into_text(), "");
        assert_eq!(ScriptValue::Bool(true).into_text(), "true");
        assert_eq!(ScriptValue::from_json(json!(42)).into_text(), "42");
        assert_eq!(ScriptValue::from(b"hi\xff".to_vec()).into_text(), "hi\u{fffd}");
        assert_eq!(
            ScriptValue::Object(Box::new(Point { x: 3, y: -1 })).into_text(),
            "(3, -1)"
        );
    }

    #[test]
    fn test_from_json_array_renders_compact() {
        let value = ScriptValue::from_json(json!([1, "two", {"three": 3}]));
        assert_eq!(value.kind(), ContentKind::Object("array".into()));
        assert_eq!(value.into_text(), r#"[1,"two",{"three":3}]"#);
    }

    #[test]
    fn test_dynamic_object_keeps_insertion_order() {
        let mut obj = DynamicObject::new();
        obj.insert("zeta", 1).insert("alpha", 2);
        assert_eq!(obj.len(), 2);
        assert_eq!(ScriptValue::from(obj).into_text(), r#"{"zeta":1,"alpha":2}"#);
    }
}
