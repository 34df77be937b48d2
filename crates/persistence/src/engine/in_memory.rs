//! In-memory row store.

use std::collections::HashMap;
use std::sync::RwLock;

use unitwork_core::{EntityKey, PropertyMap, TrackedEntity};
use unitwork_tracker::{EngineError, PersistenceEngine};

#[derive(Debug, Default)]
struct Store {
    next_key: i64,
    rows: HashMap<EntityKey, PropertyMap>,
}

/// In-memory persistence engine.
///
/// Intended for tests/dev. Keys are assigned from a monotone counter and are
/// never reused within one engine instance.
#[derive(Debug, Default)]
pub struct InMemoryEngine {
    inner: RwLock<Store>,
}

impl InMemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.inner.read().map(|s| s.rows.len()).unwrap_or(0)
    }

    fn poisoned() -> EngineError {
        EngineError::io(anyhow::anyhow!("lock poisoned"))
    }
}

impl<E: TrackedEntity> PersistenceEngine<E> for InMemoryEngine {
    fn ensure_schema(&self) -> Result<(), EngineError> {
        // Nothing physical to create.
        Ok(())
    }

    fn insert(&self, entity: &E) -> Result<EntityKey, EngineError> {
        let mut store = self.inner.write().map_err(|_| Self::poisoned())?;
        store.next_key += 1;
        let key = EntityKey::new(store.next_key).map_err(EngineError::io)?;
        store.rows.insert(key, entity.tracked_properties());
        Ok(key)
    }

    fn update(&self, entity: &E) -> Result<(), EngineError> {
        let Some(key) = entity.key() else {
            return Err(EngineError::io(anyhow::anyhow!(
                "update requires a persisted entity"
            )));
        };
        let mut store = self.inner.write().map_err(|_| Self::poisoned())?;
        if !store.rows.contains_key(&key) {
            return Err(EngineError::MissingRow(key));
        }
        store.rows.insert(key, entity.tracked_properties());
        Ok(())
    }

    fn delete(&self, key: EntityKey) -> Result<(), EngineError> {
        let mut store = self.inner.write().map_err(|_| Self::poisoned())?;
        store
            .rows
            .remove(&key)
            .map(|_| ())
            .ok_or(EngineError::MissingRow(key))
    }

    fn fetch(&self, key: EntityKey) -> Result<Option<PropertyMap>, EngineError> {
        let store = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(store.rows.get(&key).cloned())
    }
}
