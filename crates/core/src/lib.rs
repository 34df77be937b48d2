//! `unitwork-core` — domain foundation for change tracking.
//!
//! This crate contains **pure domain** primitives (no engine or storage concerns).

pub mod entity;
pub mod error;
pub mod key;
pub mod property;
pub mod value_object;

pub use entity::TrackedEntity;
pub use error::{DomainError, DomainResult};
pub use key::{EntityKey, EntryId};
pub use property::{PropertyMap, PropertyPath};
pub use value_object::{OwnedObject, ValueObject, flatten_owned};
