//! Cache-aside retrieval over the durable store
//!
//! Lookups consult the store first and only call PokéAPI on a miss. A miss
//! that reaches the network is written back before the call returns. Cached
//! records never expire; a failed remote call is never cached and never
//! retried.

use crate::error::{CacheError, Result};
use crate::types::CacheStats;
use async_trait::async_trait;
use pokeapi_client::{PokeApiClient, Pokemon, PokemonSpecies};
use pokedex_store::{CacheRecord, CacheStore, Lookup};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Remote-fetch collaborator: `GET /{namespace}/{identifier}` on some upstream
#[async_trait]
pub trait RemoteSource: Send + Sync {
    async fn fetch(&self, namespace: &str, identifier: &str) -> pokeapi_client::Result<Value>;
}

#[async_trait]
impl RemoteSource for PokeApiClient {
    async fn fetch(&self, namespace: &str, identifier: &str) -> pokeapi_client::Result<Value> {
        self.get_resource(namespace, identifier).await
    }
}

/// Key namespaces. Each maps one-to-one onto a PokéAPI resource family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Pokemon,
    Species,
    Type,
    Generation,
}

impl Namespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Pokemon => "pokemon",
            Namespace::Species => "pokemon-species",
            Namespace::Type => "type",
            Namespace::Generation => "generation",
        }
    }
}

/// Trim and case-fold a caller identifier
pub fn normalize(identifier: &str) -> Result<String> {
    let normalized = identifier.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(CacheError::InvalidIdentifier);
    }
    Ok(normalized)
}

/// Store key for an already-normalized identifier: `"<namespace>/<identifier>"`
pub fn cache_key(namespace: Namespace, normalized: &str) -> String {
    format!("{}/{}", namespace.as_str(), normalized)
}

/// A Pokémon lookup result
#[derive(Debug, Clone)]
pub struct Fetched {
    pub pokemon: Pokemon,
    /// Upstream body exactly as stored
    pub raw: Value,
    /// Whether the answer came from the store without a remote call
    pub from_cache: bool,
}

/// Cache-aside fetcher shared by every request
pub struct CachedFetcher {
    store: CacheStore,
    source: Arc<dyn RemoteSource>,
    remote_timeout: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl CachedFetcher {
    pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(store: CacheStore, source: Arc<dyn RemoteSource>) -> Self {
        Self::with_timeout(store, source, Self::DEFAULT_REMOTE_TIMEOUT)
    }

    pub fn with_timeout(
        store: CacheStore,
        source: Arc<dyn RemoteSource>,
        remote_timeout: Duration,
    ) -> Self {
        Self {
            store,
            source,
            remote_timeout,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    pub async fn stats(&self) -> CacheStats {
        let entries = match self.store.count().await {
            Ok(n) => n,
            Err(e) => {
                warn!(error = %e, "Failed to count cache records");
                0
            }
        };
        CacheStats {
            entries,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Look up a Pokémon by name or national dex number
    pub async fn fetch(&self, identifier: &str) -> Result<Fetched> {
        self.fetch_with_timeout(identifier, self.remote_timeout).await
    }

    /// Like [`fetch`](Self::fetch) with a caller-supplied bound on the remote step
    pub async fn fetch_with_timeout(&self, identifier: &str, timeout: Duration) -> Result<Fetched> {
        let normalized = normalize(identifier)?;
        let key = cache_key(Namespace::Pokemon, &normalized);

        if let Lookup::Found(record) = self.store.resolve(&key).await? {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, canonical = %record.key, "Cache hit");
            let raw = decode_payload(&record)?;
            let pokemon = Pokemon::from_payload(&raw).map_err(|e| CacheError::CorruptRecord {
                key: record.key.clone(),
                reason: e.to_string(),
            })?;
            return Ok(Fetched {
                pokemon,
                raw,
                from_cache: true,
            });
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        info!(key = %key, "Cache miss, fetching from PokéAPI");
        self.fetch_pokemon_remote(&normalized, timeout).await
    }

    /// Bypass the store, fetch from PokéAPI, and replace the cached record
    pub async fn refresh(&self, identifier: &str) -> Result<Fetched> {
        let normalized = normalize(identifier)?;
        info!(key = %cache_key(Namespace::Pokemon, &normalized), "Refreshing cache record");
        self.fetch_pokemon_remote(&normalized, self.remote_timeout)
            .await
    }

    /// Cache-aside lookup for non-Pokémon resources, keyed by the raw identifier
    pub async fn fetch_resource(&self, namespace: Namespace, identifier: &str) -> Result<Value> {
        let normalized = normalize(identifier)?;
        let key = cache_key(namespace, &normalized);

        if let Lookup::Found(record) = self.store.get(&key).await? {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(key = %key, "Cache hit");
            return decode_payload(&record);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        info!(key = %key, "Cache miss, fetching from PokéAPI");
        let raw = self
            .call_remote(namespace, &normalized, self.remote_timeout)
            .await?;
        self.store
            .put(&CacheRecord::new(key, raw.to_string()))
            .await?;
        Ok(raw)
    }

    /// Species entry (flavor text) for an already fetched Pokémon, cached
    /// under `pokemon-species/<id>`
    pub async fn species(&self, pokemon: &Pokemon) -> Result<PokemonSpecies> {
        let raw = self
            .fetch_resource(Namespace::Species, &pokemon.id.to_string())
            .await?;
        Ok(PokemonSpecies::from_payload(&raw)?)
    }

    /// Remote path for Pokémon: validate, store under the canonical name with
    /// the dex number and requested identifier as aliases, then return.
    async fn fetch_pokemon_remote(&self, normalized: &str, timeout: Duration) -> Result<Fetched> {
        let raw = self
            .call_remote(Namespace::Pokemon, normalized, timeout)
            .await?;
        let pokemon = Pokemon::from_payload(&raw)?;

        let canonical = cache_key(Namespace::Pokemon, &pokemon.name.to_lowercase());
        let mut aliases = vec![cache_key(Namespace::Pokemon, &pokemon.id.to_string())];
        let requested = cache_key(Namespace::Pokemon, normalized);
        if requested != canonical && !aliases.contains(&requested) {
            aliases.push(requested);
        }

        let record = CacheRecord::new(canonical, raw.to_string());
        self.store.put_with_aliases(&record, &aliases).await?;
        info!(key = %record.key, aliases = ?aliases, "Cached PokéAPI response");

        Ok(Fetched {
            pokemon,
            raw,
            from_cache: false,
        })
    }

    async fn call_remote(
        &self,
        namespace: Namespace,
        identifier: &str,
        timeout: Duration,
    ) -> Result<Value> {
        match tokio::time::timeout(timeout, self.source.fetch(namespace.as_str(), identifier)).await
        {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                warn!(namespace = namespace.as_str(), identifier, error = %e, "Remote fetch failed");
                Err(e.into())
            }
            Err(_) => {
                warn!(
                    namespace = namespace.as_str(),
                    identifier,
                    timeout = ?timeout,
                    "Remote fetch timed out"
                );
                Err(CacheError::RemoteUnreachable(format!(
                    "request for {}/{} timed out after {:?}",
                    namespace.as_str(),
                    identifier,
                    timeout
                )))
            }
        }
    }
}

fn decode_payload(record: &CacheRecord) -> Result<Value> {
    serde_json::from_str(&record.payload).map_err(|e| CacheError::CorruptRecord {
        key: record.key.clone(),
        reason: e.to_string(),
    })
}
