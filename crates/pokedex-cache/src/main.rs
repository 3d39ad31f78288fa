//! Pokédex cache service
//!
//! Serves Pokémon summaries over HTTP, answering from a local SQLite cache and
//! falling through to PokéAPI on a miss.

use pokeapi_client::PokeApiClient;
use pokedex_cache::server::{start_server, ServerState, SharedState};
use pokedex_cache::{CacheError, CachedFetcher, Result, ServiceConfig};
use pokedex_store::CacheStore;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive("pokedex_cache=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    info!("Starting Pokédex cache...");

    let config = ServiceConfig::from_env();
    info!("Port: {}", config.port);
    info!("PokéAPI base URL: {}", config.pokeapi_base_url);
    info!("Remote timeout: {:?}", config.remote_timeout);

    // A store that cannot be opened is fatal
    let store = CacheStore::open(&config.cache_path).await?;
    info!("Cache path: {}", store.path().display());

    let client = PokeApiClient::with_base_url(&config.pokeapi_base_url, config.remote_timeout)?;
    let fetcher = CachedFetcher::with_timeout(store.clone(), Arc::new(client), config.remote_timeout);

    let state: SharedState = Arc::new(ServerState::new(fetcher));

    let served = start_server(state, config.port)
        .await
        .map_err(|e| CacheError::Config(format!("Server error: {}", e)));
    store.close().await;
    served
}
