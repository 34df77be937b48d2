//! `unitwork-persistence` — persistence engine adapters.
//!
//! Backends behind the tracker's `PersistenceEngine` port: an in-memory row
//! store, an embedded single-file JSON store, and a networked Postgres store.
//! The tracker never knows which one it is talking to.

pub mod engine;

pub use engine::file::JsonFileEngine;
pub use engine::in_memory::InMemoryEngine;
pub use engine::postgres::PostgresEngine;
