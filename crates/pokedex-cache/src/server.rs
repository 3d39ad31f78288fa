//! HTTP server for Pokédex lookups
//!
//! Provides /health, /pokemon/{identifier}, /pokemon/{identifier}/refresh and
//! the /random family of endpoints.

use crate::error::Result;
use crate::fetcher::{CachedFetcher, Fetched};
use crate::render::{random_headline, render_details, render_summary};
use crate::types::{HealthResponse, PokemonQuery, PokemonResponse};
use axum::{
    extract::{Path, Query, State},
    http::HeaderValue,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Shared state for the HTTP server
pub struct ServerState {
    pub fetcher: CachedFetcher,
    pub started_at: DateTime<Utc>,
}

impl ServerState {
    pub fn new(fetcher: CachedFetcher) -> Self {
        Self {
            fetcher,
            started_at: Utc::now(),
        }
    }
}

pub type SharedState = Arc<ServerState>;

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/pokemon/{identifier}", get(get_pokemon))
        .route("/pokemon/{identifier}/refresh", post(refresh_pokemon))
        .route("/random", get(random_pokemon))
        .route("/random/region/{region}", get(random_from_region))
        .route("/random/type/{kind}", get(random_by_type))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(state: SharedState, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await
}

/// Health check endpoint
async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let cache = state.fetcher.stats().await;
    let uptime_secs = (Utc::now() - state.started_at).num_seconds().max(0) as u64;

    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs,
        cache,
    })
}

async fn get_pokemon(
    State(state): State<SharedState>,
    Path(identifier): Path<String>,
    Query(query): Query<PokemonQuery>,
) -> Result<Response> {
    let fetched = state.fetcher.fetch(&identifier).await?;
    pokemon_response(&state, fetched, query.include_raw, None).await
}

async fn refresh_pokemon(
    State(state): State<SharedState>,
    Path(identifier): Path<String>,
    Query(query): Query<PokemonQuery>,
) -> Result<Response> {
    let fetched = state.fetcher.refresh(&identifier).await?;
    pokemon_response(&state, fetched, query.include_raw, None).await
}

async fn random_pokemon(State(state): State<SharedState>) -> Result<Response> {
    let fetched = state.fetcher.random().await?;
    pokemon_response(&state, fetched, false, None).await
}

async fn random_from_region(
    State(state): State<SharedState>,
    Path(region): Path<String>,
) -> Result<Response> {
    let fetched = state.fetcher.random_from_region(&region).await?;
    let headline = random_headline(&region);
    pokemon_response(&state, fetched, false, Some(&headline)).await
}

async fn random_by_type(
    State(state): State<SharedState>,
    Path(kind): Path<String>,
) -> Result<Response> {
    let fetched = state.fetcher.random_by_type(&kind).await?;
    let headline = random_headline(&kind);
    pokemon_response(&state, fetched, false, Some(&headline)).await
}

/// Render a lookup result. `X-Cache` reflects the Pokémon record only.
async fn pokemon_response(
    state: &ServerState,
    fetched: Fetched,
    include_raw: bool,
    headline: Option<&str>,
) -> Result<Response> {
    let species = state.fetcher.species(&fetched.pokemon).await?;
    let cache_header = if fetched.from_cache { "HIT" } else { "MISS" };
    let body = PokemonResponse {
        summary: render_summary(&fetched.pokemon),
        details: render_details(&fetched.pokemon, &species, headline),
        raw_payload: include_raw.then_some(fetched.raw),
    };

    let mut response = Json(body).into_response();
    response
        .headers_mut()
        .insert("X-Cache", HeaderValue::from_static(cache_header));
    Ok(response)
}
