//! Script return values and their normalization.
//!
//! # Data Flow
//! ```text
//! function result (loosely typed)
//!     → value.rs (ScriptValue: stream, text, bytes, dynamic, object, null)
//!     → normalize.rs (dynamic map → compact JSON text)
//!     → format::resolver
//! ```

pub mod normalize;
pub mod value;

pub use normalize::normalize;
pub use value::{ContentKind, ContentStream, DynamicObject, ScriptObject, ScriptValue};
