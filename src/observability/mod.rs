//! Observability subsystem.
//!
//! The response layer emits `tracing` events only: formatter selection and
//! fallback at debug, resolution faults at error. This module installs the
//! subscriber for the preview host.

pub mod logging;

pub use logging::init_logging;
