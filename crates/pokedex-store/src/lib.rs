//! Durable key/value store for the Pokédex cache
//!
//! A single SQLite file holds one row per cache key. The store performs no
//! validation and applies no policy: it opens the file, reads a key, and
//! replaces a key. Freshness decisions live one layer up.

pub mod error;
pub mod records;
pub mod store;
pub mod types;

pub use error::{Result, StoreError};
pub use sqlx::sqlite::SqlitePool;
pub use store::CacheStore;
pub use types::*;
