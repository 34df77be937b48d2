//! Tracked entity trait: identity + the tracked property surface.

use serde_json::Value as JsonValue;

use crate::error::DomainResult;
use crate::key::EntityKey;
use crate::property::{PropertyMap, PropertyPath};

/// An entity whose observable state can be snapshotted and diffed.
///
/// Implementations expose their state as a flat [`PropertyMap`]: root scalar
/// properties under their own name, owned sub-objects flattened under
/// `field.prop` paths (see [`crate::value_object::flatten_owned`]). The
/// tracker never looks inside the entity any other way, so whatever the map
/// reports is exactly what is change-tracked.
pub trait TrackedEntity: Clone + core::fmt::Debug {
    /// Short stable name of this entity kind. Used as the storage table name
    /// and in log fields.
    fn kind() -> &'static str;

    /// Persistence-assigned key; `None` until the first successful insert.
    fn key(&self) -> Option<EntityKey>;

    /// Record the key generated by the persistence engine.
    fn assign_key(&mut self, key: EntityKey);

    /// Flat map of every tracked scalar property, owned objects included.
    fn tracked_properties(&self) -> PropertyMap;

    /// Write a single property value back into the entity graph.
    ///
    /// Fails with [`crate::DomainError::InvalidPath`] if the path does not
    /// address a declared property, or `Validation` if the JSON value has the
    /// wrong shape for it.
    fn write_property(&mut self, path: &PropertyPath, value: JsonValue) -> DomainResult<()>;
}
