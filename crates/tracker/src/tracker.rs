//! The change tracker: one unit of work over a graph of tracked entities.

use serde_json::Value as JsonValue;
use thiserror::Error;
use tracing::{debug, info};

use unitwork_core::{DomainError, EntityKey, EntryId, PropertyPath, TrackedEntity};

use crate::engine::{EngineError, PersistenceEngine};
use crate::entry::TrackedEntry;
use crate::snapshot::Snapshot;
use crate::state::EntryState;

/// Result type for tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Change tracking error.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Operation attempted on a deleted, detached or untracked entry.
    #[error("invalid entry state: {0}")]
    InvalidState(String),

    /// A commit-time invariant was broken (e.g. unresolvable identity).
    #[error("persistence contract violation: {0}")]
    ContractViolation(String),

    /// Engine failure, passed through uninterpreted.
    #[error("persistence engine failure: {0}")]
    Persistence(#[from] EngineError),

    /// Property-level failure reported by the entity itself.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Counts of engine operations performed by one `save_changes` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveReport {
    pub inserted: usize,
    pub updated: usize,
    pub deleted: usize,
}

impl SaveReport {
    pub fn total(&self) -> usize {
        self.inserted + self.updated + self.deleted
    }
}

enum Staged<E> {
    Commit {
        index: usize,
        entity: E,
        snapshot: Snapshot,
    },
    Drop {
        index: usize,
    },
}

/// Unit-of-work change tracker.
///
/// Owns every entity registered with it; mutation goes through
/// [`ChangeTracker::mutate_property`] (notified writes) or through
/// [`ChangeTracker::entity_mut`] followed by a
/// [`ChangeTracker::detect_changes`] sweep. One instance per logical unit of
/// work; not thread-safe, by design.
#[derive(Debug)]
pub struct ChangeTracker<E: TrackedEntity> {
    entries: Vec<TrackedEntry<E>>,
}

impl<E: TrackedEntity> Default for ChangeTracker<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: TrackedEntity> ChangeTracker<E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register an entity loaded from storage as Unchanged, capturing a deep
    /// snapshot of its tracked properties (owned objects included).
    ///
    /// Loaded entities must carry their persistent key, and one identity can
    /// be tracked at most once per unit of work.
    pub fn load(&mut self, entity: E) -> TrackerResult<EntryId> {
        let key = entity.key().ok_or_else(|| {
            TrackerError::ContractViolation(format!(
                "loaded {} entity carries no persistent key",
                E::kind()
            ))
        })?;
        if self.find_by_key(key).is_some() {
            return Err(TrackerError::InvalidState(format!(
                "{}/{key} is already tracked",
                E::kind()
            )));
        }

        let entry = TrackedEntry::loaded(entity);
        let id = entry.id();
        debug!(kind = E::kind(), %key, entry = %id, "entity loaded");
        self.entries.push(entry);
        Ok(id)
    }

    /// Register a new entity as Added. No snapshot comparison applies until
    /// it has been persisted.
    pub fn add(&mut self, entity: E) -> EntryId {
        let entry = TrackedEntry::added(entity);
        let id = entry.id();
        debug!(kind = E::kind(), entry = %id, "entity added");
        self.entries.push(entry);
        id
    }

    /// Mark an entry Deleted.
    ///
    /// Removing an Added entry detaches it instead: there is nothing in the
    /// store to delete. Removing a Deleted entry is a no-op.
    pub fn remove(&mut self, id: EntryId) -> TrackerResult<()> {
        let index = self.index_of(id)?;
        match self.entries[index].state() {
            EntryState::Added => {
                let entry = self.entries.remove(index);
                debug!(kind = E::kind(), entry = %id, "added entry detached on remove");
                drop(entry.into_entity());
            }
            EntryState::Unchanged | EntryState::Modified => {
                self.entries[index].set_state(EntryState::Deleted);
                debug!(kind = E::kind(), entry = %id, "entry marked deleted");
            }
            EntryState::Deleted => {}
            EntryState::Detached => {
                return Err(TrackerError::InvalidState(format!(
                    "entry {id} is detached"
                )));
            }
        }
        Ok(())
    }

    /// Stop tracking an entry and hand its entity back to the caller.
    pub fn detach(&mut self, id: EntryId) -> TrackerResult<E> {
        let index = self.index_of(id)?;
        let entry = self.entries.remove(index);
        debug!(kind = E::kind(), entry = %id, "entry detached");
        Ok(entry.into_entity())
    }

    /// Release every tracked entry (unit-of-work disposal).
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Apply a value change at `path` anywhere in the entity's owned graph.
    ///
    /// Transitions an Unchanged entry to Modified iff the written value
    /// differs from the snapshot at that path under value semantics; a path
    /// without a snapshot value counts as dirty. Re-applying an
    /// already-applied value is idempotent on state.
    pub fn mutate_property(
        &mut self,
        id: EntryId,
        path: &PropertyPath,
        value: JsonValue,
    ) -> TrackerResult<()> {
        let index = self.index_of(id)?;
        let state = self.entries[index].state();
        if !state.accepts_mutation() {
            return Err(TrackerError::InvalidState(format!(
                "cannot mutate {state} entry {id}"
            )));
        }

        let entry = &mut self.entries[index];
        entry.entity_mut().write_property(path, value)?;

        if entry.state() == EntryState::Unchanged {
            let current = entry.entity().tracked_properties();
            let dirty = match entry.snapshot() {
                Some(snapshot) => snapshot.differs_at(path, current.get(path)),
                None => true,
            };
            if dirty {
                entry.set_state(EntryState::Modified);
                debug!(kind = E::kind(), entry = %id, %path, "entry marked modified");
            }
        }
        Ok(())
    }

    /// Lazy, finite, restartable sequence of tracked entries, in registration
    /// order. Each call produces a fresh iterator over the current list.
    pub fn entries(&self) -> impl Iterator<Item = &TrackedEntry<E>> + '_ {
        self.entries.iter()
    }

    pub fn entry(&self, id: EntryId) -> Option<&TrackedEntry<E>> {
        self.entries.iter().find(|e| e.id() == id)
    }

    pub fn entity(&self, id: EntryId) -> Option<&E> {
        self.entry(id).map(TrackedEntry::entity)
    }

    /// Direct mutable access to a tracked entity.
    ///
    /// This is the observation-free write channel: the tracker cannot see
    /// writes made through it, so follow up with [`Self::detect_changes`]
    /// (or rely on `save_changes`, which sweeps first).
    pub fn entity_mut(&mut self, id: EntryId) -> TrackerResult<&mut E> {
        let index = self.index_of(id)?;
        let state = self.entries[index].state();
        if !state.accepts_mutation() {
            return Err(TrackerError::InvalidState(format!(
                "cannot mutate {state} entry {id}"
            )));
        }
        Ok(self.entries[index].entity_mut())
    }

    pub fn find_by_key(&self, key: EntityKey) -> Option<EntryId> {
        self.entries
            .iter()
            .find(|e| e.key() == Some(key))
            .map(TrackedEntry::id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-compare every Unchanged entry against its snapshot, flagging the
    /// ones that drifted as Modified.
    ///
    /// Safe to call repeatedly; Added and Deleted entries are never touched.
    pub fn detect_changes(&mut self) {
        for entry in &mut self.entries {
            if entry.state() != EntryState::Unchanged {
                continue;
            }
            let dirty = match entry.snapshot() {
                Some(snapshot) => snapshot.differs_from(&entry.entity().tracked_properties()),
                None => true,
            };
            if dirty {
                entry.set_state(EntryState::Modified);
                debug!(kind = E::kind(), entry = %entry.id(), "sweep marked entry modified");
            }
        }
    }

    /// Flush every dirty entry through the engine.
    ///
    /// Runs a [`Self::detect_changes`] sweep first, then inserts Added
    /// entries, updates Modified ones and deletes Deleted ones. Tracked state
    /// is only touched after **every** engine operation has succeeded:
    /// surviving entries return to Unchanged with refreshed snapshots,
    /// Deleted entries are dropped. On engine failure the error propagates
    /// and all entries keep their pre-save state.
    pub fn save_changes<P: PersistenceEngine<E>>(&mut self, engine: &P) -> TrackerResult<SaveReport> {
        self.detect_changes();

        let mut staged: Vec<Staged<E>> = Vec::new();
        let mut report = SaveReport::default();

        for (index, entry) in self.entries.iter().enumerate() {
            match entry.state() {
                EntryState::Unchanged | EntryState::Detached => {}
                EntryState::Added => {
                    let key = engine.insert(entry.entity())?;
                    let mut entity = entry.entity().clone();
                    entity.assign_key(key);
                    if entity.key() != Some(key) {
                        return Err(TrackerError::ContractViolation(format!(
                            "{} entity did not retain generated key {key}",
                            E::kind()
                        )));
                    }
                    let snapshot = Snapshot::capture(&entity);
                    report.inserted += 1;
                    staged.push(Staged::Commit {
                        index,
                        entity,
                        snapshot,
                    });
                }
                EntryState::Modified => {
                    let key = entry.key().ok_or_else(|| {
                        TrackerError::ContractViolation(format!(
                            "modified {} entry {} has no key",
                            E::kind(),
                            entry.id()
                        ))
                    })?;
                    engine.update(entry.entity())?;
                    debug!(kind = E::kind(), %key, "row updated");
                    let entity = entry.entity().clone();
                    let snapshot = Snapshot::capture(&entity);
                    report.updated += 1;
                    staged.push(Staged::Commit {
                        index,
                        entity,
                        snapshot,
                    });
                }
                EntryState::Deleted => {
                    let key = entry.key().ok_or_else(|| {
                        TrackerError::ContractViolation(format!(
                            "deleted {} entry {} has no key",
                            E::kind(),
                            entry.id()
                        ))
                    })?;
                    engine.delete(key)?;
                    report.deleted += 1;
                    staged.push(Staged::Drop { index });
                }
            }
        }

        // Every engine call succeeded; only now touch tracked state.
        let mut dropped = vec![false; self.entries.len()];
        for change in staged {
            match change {
                Staged::Commit {
                    index,
                    entity,
                    snapshot,
                } => self.entries[index].commit(entity, snapshot),
                Staged::Drop { index } => dropped[index] = true,
            }
        }
        let mut i = 0;
        self.entries.retain(|_| {
            let keep = !dropped[i];
            i += 1;
            keep
        });

        info!(
            kind = E::kind(),
            inserted = report.inserted,
            updated = report.updated,
            deleted = report.deleted,
            "changes saved"
        );
        Ok(report)
    }

    fn index_of(&self, id: EntryId) -> TrackerResult<usize> {
        self.entries
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| TrackerError::InvalidState(format!("entry {id} is not tracked")))
    }
}
