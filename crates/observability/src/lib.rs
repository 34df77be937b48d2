//! Tracing/logging setup shared by tracker consumers.

/// Tracing configuration (filters, format).
pub mod tracing;

pub use tracing::init;
