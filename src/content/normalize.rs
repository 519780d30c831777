//! Pre-resolution normalization of dynamic content.

use crate::content::value::ScriptValue;
use crate::response::error::ResponseError;

/// Convert schema-less dynamic objects to compact JSON text.
///
/// Every other shape is returned unchanged. No formatter ever sees a
/// `ScriptValue::Dynamic`.
pub fn normalize(content: ScriptValue) -> Result<ScriptValue, ResponseError> {
    match content {
        ScriptValue::Dynamic(obj) => {
            let text = serde_json::to_string(&obj).map_err(ResponseError::Normalization)?;
            Ok(ScriptValue::Text(text))
        }
        other => Ok(other),
    }
}
