//! Embedded single-file store.
//!
//! One engine instance owns one JSON document on disk, holding the key
//! counter and every row for one entity kind. Every write rewrites the
//! document; read performance is irrelevant at the scale this backend is
//! meant for (local tooling, test fixtures that must survive reopen).

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use unitwork_core::{EntityKey, PropertyMap, TrackedEntity};
use unitwork_tracker::{EngineError, PersistenceEngine};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    next_key: i64,
    rows: BTreeMap<i64, PropertyMap>,
}

/// File-backed persistence engine.
#[derive(Debug, Clone)]
pub struct JsonFileEngine {
    path: PathBuf,
}

impl JsonFileEngine {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Document, EngineError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(EngineError::Schema(format!(
                    "store file {} missing (run ensure_schema first)",
                    self.path.display()
                )));
            }
            Err(e) => {
                return Err(EngineError::io(
                    anyhow::Error::new(e)
                        .context(format!("reading {}", self.path.display())),
                ));
            }
        };
        Ok(serde_json::from_str(&raw)?)
    }

    fn store(&self, document: &Document) -> Result<(), EngineError> {
        let raw = serde_json::to_string_pretty(document)?;
        fs::write(&self.path, raw).map_err(|e| {
            EngineError::io(
                anyhow::Error::new(e).context(format!("writing {}", self.path.display())),
            )
        })
    }
}

impl<E: TrackedEntity> PersistenceEngine<E> for JsonFileEngine {
    fn ensure_schema(&self) -> Result<(), EngineError> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))
                .map_err(EngineError::io)?;
        }
        debug!(kind = E::kind(), path = %self.path.display(), "store file created");
        self.store(&Document::default())
    }

    fn insert(&self, entity: &E) -> Result<EntityKey, EngineError> {
        let mut document = self.load()?;
        document.next_key += 1;
        let key = EntityKey::new(document.next_key).map_err(EngineError::io)?;
        document.rows.insert(key.get(), entity.tracked_properties());
        self.store(&document)?;
        Ok(key)
    }

    fn update(&self, entity: &E) -> Result<(), EngineError> {
        let Some(key) = entity.key() else {
            return Err(EngineError::io(anyhow::anyhow!(
                "update requires a persisted entity"
            )));
        };
        let mut document = self.load()?;
        if !document.rows.contains_key(&key.get()) {
            return Err(EngineError::MissingRow(key));
        }
        document.rows.insert(key.get(), entity.tracked_properties());
        self.store(&document)
    }

    fn delete(&self, key: EntityKey) -> Result<(), EngineError> {
        let mut document = self.load()?;
        if document.rows.remove(&key.get()).is_none() {
            return Err(EngineError::MissingRow(key));
        }
        self.store(&document)
    }

    fn fetch(&self, key: EntityKey) -> Result<Option<PropertyMap>, EngineError> {
        Ok(self.load()?.rows.get(&key.get()).cloned())
    }
}
