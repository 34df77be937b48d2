//! Value objects and owned sub-objects.
//!
//! Value objects have **no identity** — they are defined entirely by their
//! attribute values, and two instances with equal values are equal. Owned
//! objects are value objects embedded in an entity: their lifecycle and
//! identity derive wholly from the owner, and mutating one dirties the
//! owning entity's tracked entry, never a entry of their own.

use serde_json::Value as JsonValue;

use crate::property::{PropertyMap, PropertyPath};

/// Marker trait for value objects.
///
/// Compared by value (`PartialEq` over attributes), cheap to copy, no
/// identity of their own.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// A value object owned by an entity (one-to-one, existence-dependent).
///
/// Structural equality is the dirty-check contract: two owned objects are
/// "the same value" iff all declared value properties are equal, null-safe.
/// `Money { amount, currency }` embedded in an invoice is the canonical
/// example.
pub trait OwnedObject: ValueObject {
    /// Property values of this owned object, keyed relative to itself.
    fn value_properties(&self) -> PropertyMap;
}

/// Flatten an optional owned object into its owner's property map.
///
/// An absent owned object contributes a single `field: null` entry; a present
/// one contributes one `field.prop` entry per declared property. This keeps
/// "no owned object" and "owned object whose properties are all null"
/// distinct under map equality.
pub fn flatten_owned<O: OwnedObject>(out: &mut PropertyMap, field: &PropertyPath, owned: Option<&O>) {
    match owned {
        None => {
            out.insert(field.clone(), JsonValue::Null);
        }
        Some(object) => {
            for (rel, value) in object.value_properties() {
                out.insert(field.join(&rel), value);
            }
        }
    }
}
