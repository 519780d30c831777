//! Output formatting subsystem.
//!
//! # Data Flow
//! ```text
//! normalized content + RequestContext
//!     → context.rs (WriteContext: media type, kind, content)
//!     → resolver.rs (first formatter whose can_write accepts)
//!         - stream.rs (ContentStream, any media type)
//!         - text.rs (String, charset from media type)
//!         - binary.rs (Bytes, non-text media types)
//!     → on no match: coerce to text, resolve once more
//!     → formatter.write(body)
//! ```
//!
//! # Design Decisions
//! - Formatters are stateless and shared across requests
//! - Formatters never touch headers or status

pub mod binary;
pub mod context;
pub mod media;
pub mod resolver;
pub mod stream;
pub mod text;

use std::fmt;

use async_trait::async_trait;
use tokio::io::AsyncWrite;

use crate::response::error::ResponseError;

pub use binary::BinaryOutputFormatter;
pub use context::{RequestContext, WriteContext};
pub use media::{Charset, MediaType};
pub use resolver::{FormatterResolver, Resolution};
pub use stream::StreamOutputFormatter;
pub use text::TextOutputFormatter;

/// A capability-gated writer for one content shape.
#[async_trait]
pub trait OutputFormatter: Send + Sync + fmt::Debug {
    /// Short name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Returns true if this formatter can write the context.
    fn can_write(&self, ctx: &WriteContext) -> bool;

    /// Write the content to `body`, returning the number of bytes written.
    async fn write(
        &self,
        ctx: WriteContext,
        body: &mut (dyn AsyncWrite + Send + Unpin),
    ) -> Result<u64, ResponseError>;
}
