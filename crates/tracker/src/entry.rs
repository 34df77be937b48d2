//! Tracked entries: one entity plus its snapshot and state tag.

use unitwork_core::{EntityKey, EntryId, TrackedEntity};

use crate::snapshot::Snapshot;
use crate::state::EntryState;

/// One tracked entity inside a unit of work.
///
/// Owned sub-objects have no entry of their own; their values live in the
/// owner's snapshot and any change to them dirties this entry.
#[derive(Debug, Clone)]
pub struct TrackedEntry<E: TrackedEntity> {
    id: EntryId,
    state: EntryState,
    snapshot: Option<Snapshot>,
    entity: E,
}

impl<E: TrackedEntity> TrackedEntry<E> {
    /// Entry for an entity loaded from storage: Unchanged, snapshot captured.
    pub(crate) fn loaded(entity: E) -> Self {
        Self {
            id: EntryId::new(),
            state: EntryState::Unchanged,
            snapshot: Some(Snapshot::capture(&entity)),
            entity,
        }
    }

    /// Entry for a freshly added entity: no snapshot until persisted.
    pub(crate) fn added(entity: E) -> Self {
        Self {
            id: EntryId::new(),
            state: EntryState::Added,
            snapshot: None,
            entity,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn state(&self) -> EntryState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty()
    }

    pub fn entity(&self) -> &E {
        &self.entity
    }

    pub fn key(&self) -> Option<EntityKey> {
        self.entity.key()
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub(crate) fn entity_mut(&mut self) -> &mut E {
        &mut self.entity
    }

    pub(crate) fn set_state(&mut self, state: EntryState) {
        self.state = state;
    }

    /// Accept the post-save entity and snapshot, returning to Unchanged.
    pub(crate) fn commit(&mut self, entity: E, snapshot: Snapshot) {
        self.entity = entity;
        self.snapshot = Some(snapshot);
        self.state = EntryState::Unchanged;
    }

    pub(crate) fn into_entity(mut self) -> E {
        self.state = EntryState::Detached;
        self.entity
    }
}
