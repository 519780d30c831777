//! HTTP preview host.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → envelope.rs (JSON envelope → ResponseDescriptor)
//!     → response::render (normalize, resolve, write)
//!     → Send to client
//! ```

pub mod envelope;
pub mod server;

pub use envelope::RenderEnvelope;
pub use server::HttpServer;
