//! Tracked entry lifecycle states.

use serde::{Deserialize, Serialize};

/// State tag of a tracked entry relative to its load-time snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryState {
    /// Matches the snapshot; nothing to persist.
    Unchanged,
    /// At least one tracked property differs from the snapshot.
    Modified,
    /// Registered as new; no snapshot comparison applies until persisted.
    Added,
    /// Scheduled for deletion on the next save.
    Deleted,
    /// No longer tracked by any unit of work.
    Detached,
}

impl EntryState {
    /// Whether the entry has pending work for `save_changes`.
    pub fn is_dirty(self) -> bool {
        matches!(self, Self::Modified | Self::Added | Self::Deleted)
    }

    /// Whether property mutation is legal in this state.
    pub fn accepts_mutation(self) -> bool {
        matches!(self, Self::Unchanged | Self::Modified | Self::Added)
    }
}

impl core::fmt::Display for EntryState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Self::Unchanged => "unchanged",
            Self::Modified => "modified",
            Self::Added => "added",
            Self::Deleted => "deleted",
            Self::Detached => "detached",
        };
        f.write_str(s)
    }
}
