//! Response formatting for dynamically-typed script functions.
//!
//! A function returns a loosely-typed value plus an optional status code
//! and headers. This crate picks a writer for the value, falls back to its
//! text form when nothing accepts it, and applies headers, body and status
//! to the transport in that order.

pub mod config;
pub mod content;
pub mod format;
pub mod http;
pub mod observability;
pub mod response;

pub use config::HostConfig;
pub use content::{ContentStream, DynamicObject, ScriptObject, ScriptValue};
pub use format::{FormatterResolver, OutputFormatter, RequestContext};
pub use http::HttpServer;
pub use response::{render, ResponseDescriptor, ResponseError, ResponseSink, ScriptResponse};
