//! `unitwork-tracker` — unit-of-work change tracking.
//!
//! A [`ChangeTracker`] owns a set of loaded/added entities, detects which of
//! them have observable state mutated since load (owned sub-objects
//! included), and flushes the dirty ones through a [`PersistenceEngine`].
//!
//! One tracker instance belongs to exactly one logical unit of work and is
//! not thread-safe by design; share nothing, or lock externally.

pub mod engine;
pub mod entry;
pub mod snapshot;
pub mod state;
pub mod tracker;

pub use engine::{EngineError, PersistenceEngine};
pub use entry::TrackedEntry;
pub use snapshot::Snapshot;
pub use state::EntryState;
pub use tracker::{ChangeTracker, SaveReport, TrackerError, TrackerResult};

#[cfg(test)]
mod fixture;
