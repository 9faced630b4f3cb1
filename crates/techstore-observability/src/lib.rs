//! Observability for the TechStore storefront.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with component and page context
//! - `LogSink` - Pluggable output (browser console, stderr, in-memory capture)

mod logging;

pub use logging::*;
