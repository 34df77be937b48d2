//! Persistence engine port.
//!
//! The tracker flushes through this boundary from `save_changes` and nowhere
//! else. Engines are synchronous from the tracker's point of view; pooling,
//! retry/backoff and connection lifetime all live behind the trait.

use thiserror::Error;

use unitwork_core::{EntityKey, PropertyMap, TrackedEntity};

/// Storage boundary for one entity kind.
pub trait PersistenceEngine<E: TrackedEntity> {
    /// Create the physical shape backing `E::kind()` if it does not exist.
    fn ensure_schema(&self) -> Result<(), EngineError>;

    /// Insert a new row, returning the generated key.
    fn insert(&self, entity: &E) -> Result<EntityKey, EngineError>;

    /// Overwrite the row addressed by the entity's key.
    fn update(&self, entity: &E) -> Result<(), EngineError>;

    /// Delete the row addressed by `key`.
    fn delete(&self, key: EntityKey) -> Result<(), EngineError>;

    /// Read back the raw property row for `key`, if present.
    ///
    /// The tracker itself never calls this; callers use it to rehydrate
    /// entities when starting a fresh unit of work.
    fn fetch(&self, key: EntityKey) -> Result<Option<PropertyMap>, EngineError>;
}

/// Engine operation error.
///
/// These are **storage errors**; the tracker passes them through to its
/// caller uninterpreted and untouched.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Opaque IO/backend failure.
    #[error("engine io failure: {0}")]
    Io(anyhow::Error),

    /// An update or delete addressed a row that does not exist.
    #[error("no row for key {0}")]
    MissingRow(EntityKey),

    /// Row (de)serialization failed.
    #[error("row serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Schema creation/verification failed.
    #[error("schema setup failed: {0}")]
    Schema(String),
}

impl EngineError {
    pub fn io(err: impl Into<anyhow::Error>) -> Self {
        Self::Io(err.into())
    }
}
