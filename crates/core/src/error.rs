//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures (validation, malformed paths,
/// bad identifiers). Engine/storage concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. wrong JSON shape for a property).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A property path was malformed or does not exist on the entity.
    #[error("invalid property path: {0}")]
    InvalidPath(String),

    /// An entity key was invalid (keys are assigned by the engine, > 0).
    #[error("invalid entity key: {0}")]
    InvalidKey(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    pub fn invalid_key(msg: impl Into<String>) -> Self {
        Self::InvalidKey(msg.into())
    }
}
