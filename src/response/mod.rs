//! Response writing subsystem.
//!
//! # Data Flow
//! ```text
//! ResponseDescriptor (status?, headers?, content)
//!     → execute.rs
//!         1. parse headers, validate status      (no mutation)
//!         2. content::normalize                  (no mutation)
//!         3. format::resolver                    (no mutation)
//!         4. sink.append_header for each header
//!         5. formatter.write(sink.body()), flush
//!         6. sink.set_status
//!     → sink.rs (ResponseSink; BufferedResponse → axum Response)
//! ```
//!
//! # Design Decisions
//! - Status is applied after the body; `BufferedResponse` makes that safe
//!   for transports that lock the status once bytes are flushed
//! - Descriptors are consumed by value, one write per descriptor

pub mod descriptor;
pub mod error;
pub mod execute;
pub mod sink;

pub use descriptor::{ResponseDescriptor, ResponseDescriptorBuilder};
pub use error::{ResponseError, ResponseResult};
pub use execute::{render, ScriptResponse};
pub use sink::{BufferedResponse, ResponseSink};
