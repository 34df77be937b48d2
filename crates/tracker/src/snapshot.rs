//! Load-time property snapshots and null-safe dirty checks.

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

use unitwork_core::{PropertyMap, PropertyPath, TrackedEntity};

/// Deep snapshot of an entity's tracked property values at load time.
///
/// Comparison is value-based over the flattened property map, so a change
/// anywhere in the owned graph shows up as a difference here, and the map
/// shape itself (owned object present vs absent) takes part in the check.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    captured_at: DateTime<Utc>,
    values: PropertyMap,
}

impl Snapshot {
    pub fn capture<E: TrackedEntity>(entity: &E) -> Self {
        Self::from_values(entity.tracked_properties())
    }

    pub fn from_values(values: PropertyMap) -> Self {
        Self {
            captured_at: Utc::now(),
            values,
        }
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn values(&self) -> &PropertyMap {
        &self.values
    }

    pub fn value_at(&self, path: &PropertyPath) -> Option<&JsonValue> {
        self.values.get(path)
    }

    /// Null-safe dirty check for a single path.
    ///
    /// A path with no snapshot value is always dirty, as is a snapshot value
    /// whose current counterpart disappeared (e.g. the owned object holding
    /// it was replaced).
    pub fn differs_at(&self, path: &PropertyPath, current: Option<&JsonValue>) -> bool {
        match (self.values.get(path), current) {
            (Some(snapshot), Some(current)) => snapshot != current,
            (None, _) | (Some(_), None) => true,
        }
    }

    /// Whole-entity dirty check against a freshly flattened property map.
    pub fn differs_from(&self, current: &PropertyMap) -> bool {
        &self.values != current
    }
}
