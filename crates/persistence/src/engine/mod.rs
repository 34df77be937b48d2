//! Engine adapters.
//!
//! Each backend stores one row per entity: the persistence-assigned key plus
//! the flattened property map. No further schema knowledge is required; the
//! tracker hands engines the declared tracked properties and nothing else.

pub mod file;
pub mod in_memory;
pub mod postgres;

pub use file::JsonFileEngine;
pub use in_memory::InMemoryEngine;
pub use postgres::PostgresEngine;
