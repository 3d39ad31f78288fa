//! Pokédex lookups backed by a durable read-through cache
//!
//! [`CachedFetcher`] answers repeated lookups from a SQLite store and only
//! calls PokéAPI on a miss. Cached records never expire; the refresh path is
//! the only way to replace one.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod random;
pub mod render;
pub mod server;
pub mod types;

pub use config::ServiceConfig;
pub use error::{CacheError, Result};
pub use fetcher::{cache_key, normalize, CachedFetcher, Fetched, Namespace, RemoteSource};
pub use render::{render_details, render_summary};
pub use types::{CacheStats, HealthResponse, PokemonQuery, PokemonResponse};
