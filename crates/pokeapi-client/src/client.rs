//! PokéAPI HTTP client

use crate::error::{PokeApiError, Result};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Client for the read-only PokéAPI
///
/// Each call returns the upstream body as parsed JSON, classified into
/// not-found / unreachable / malformed on failure. No retries are attempted.
#[derive(Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl PokeApiClient {
    /// Base URL for PokéAPI v2
    pub const BASE_URL: &'static str = "https://pokeapi.co/api/v2";
    /// User agent sent with every request
    pub const USER_AGENT: &'static str = "pokedex-app/1.0";

    /// Create a new client against the public API (30 second timeout)
    pub fn new() -> Result<Self> {
        Self::with_base_url(Self::BASE_URL, Duration::from_secs(30))
    }

    /// Create a new client against a custom base URL with a custom timeout
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(Self::USER_AGENT)
            .build()
            .map_err(|e| {
                PokeApiError::Unreachable(format!("failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get a Pokémon by lowercase name or national dex number
    pub async fn get_pokemon(&self, name_or_id: &str) -> Result<Value> {
        self.get_resource("pokemon", name_or_id).await
    }

    /// Get a species (flavor text, genus, ...) by name or dex number
    pub async fn get_species(&self, name_or_id: &str) -> Result<Value> {
        self.get_resource("pokemon-species", name_or_id).await
    }

    /// Get a type (e.g. `fire`) with its member Pokémon
    pub async fn get_type(&self, name: &str) -> Result<Value> {
        self.get_resource("type", name).await
    }

    /// Get a generation (e.g. `1`) with its species list
    pub async fn get_generation(&self, id: &str) -> Result<Value> {
        self.get_resource("generation", id).await
    }

    /// Fetch `GET {base}/{namespace}/{identifier}` and parse the body as JSON
    ///
    /// # Arguments
    /// * `namespace` - API resource family, e.g. `pokemon`
    /// * `identifier` - name or numeric id; URL-encoded before sending
    pub async fn get_resource(&self, namespace: &str, identifier: &str) -> Result<Value> {
        let path = format!("/{}/{}", namespace, urlencoding::encode(identifier));
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Requesting PokéAPI resource");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(PokeApiError::NotFound(path));
        }
        if !status.is_success() {
            warn!(url = %url, status = %status, "PokéAPI returned an error status");
            return Err(PokeApiError::Unreachable(format!(
                "PokéAPI returned status {} for {}",
                status, path
            )));
        }

        let body = response.bytes().await?;
        let value: Value = serde_json::from_slice(&body)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Path,
        http::StatusCode as AxumStatus,
        response::{IntoResponse, Response},
        routing::get,
        Json, Router,
    };
    use serde_json::json;

    async fn pokemon_handler(Path(id): Path<String>) -> Response {
        match id.as_str() {
            "pikachu" | "25" => Json(json!({ "id": 25, "name": "pikachu" })).into_response(),
            "mr. mime" => Json(json!({ "id": 122, "name": "mr-mime" })).into_response(),
            "broken" => (AxumStatus::OK, "<html>definitely not json").into_response(),
            "overloaded" => AxumStatus::SERVICE_UNAVAILABLE.into_response(),
            _ => (AxumStatus::NOT_FOUND, "Not Found").into_response(),
        }
    }

    /// Serve a fake PokéAPI on an ephemeral port and return its base URL
    async fn spawn_upstream() -> String {
        let router = Router::new()
            .route("/pokemon/{id}", get(pokemon_handler))
            .route(
                "/generation/{id}",
                get(|| async { Json(json!({ "id": 1, "name": "generation-i" })) }),
            )
            .route(
                "/type/{name}",
                get(|Path(name): Path<String>| async move {
                    Json(json!({ "id": 10, "name": name, "pokemon": [] }))
                }),
            )
            .route(
                "/pokemon-species/{id}",
                get(|Path(id): Path<String>| async move {
                    Json(json!({ "id": id.parse::<u32>().unwrap_or(0), "name": "pikachu" }))
                }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_for(base_url: &str) -> PokeApiClient {
        PokeApiClient::with_base_url(base_url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_get_pokemon_success() {
        let base = spawn_upstream().await;
        let value = client_for(&base).get_pokemon("pikachu").await.unwrap();
        assert_eq!(value["name"], "pikachu");
        assert_eq!(value["id"], 25);
    }

    #[tokio::test]
    async fn test_identifier_is_url_encoded() {
        let base = spawn_upstream().await;
        let value = client_for(&base).get_pokemon("mr. mime").await.unwrap();
        assert_eq!(value["name"], "mr-mime");
    }

    #[tokio::test]
    async fn test_not_found() {
        let base = spawn_upstream().await;
        let err = client_for(&base)
            .get_pokemon("not-a-real-entity")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("/pokemon/not-a-real-entity"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let base = spawn_upstream().await;
        let err = client_for(&base).get_pokemon("broken").await.unwrap_err();
        assert!(matches!(err, PokeApiError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_server_error_is_unreachable() {
        let base = spawn_upstream().await;
        let err = client_for(&base).get_pokemon("overloaded").await.unwrap_err();
        assert!(err.is_unreachable());
    }

    #[tokio::test]
    async fn test_connection_refused_is_unreachable() {
        // Grab a free port, then close it so nothing is listening there
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(&format!("http://{}", addr))
            .get_pokemon("pikachu")
            .await
            .unwrap_err();
        assert!(err.is_unreachable());
    }

    #[tokio::test]
    async fn test_get_generation() {
        let base = spawn_upstream().await;
        let value = client_for(&base).get_generation("1").await.unwrap();
        assert_eq!(value["name"], "generation-i");
    }

    #[tokio::test]
    async fn test_get_type() {
        let base = spawn_upstream().await;
        let value = client_for(&base).get_type("fire").await.unwrap();
        assert_eq!(value["name"], "fire");
    }

    #[tokio::test]
    async fn test_get_species() {
        let base = spawn_upstream().await;
        let value = client_for(&base).get_species("25").await.unwrap();
        assert_eq!(value["id"], 25);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = client_for("http://localhost:9999/api/v2/");
        assert_eq!(client.base_url(), "http://localhost:9999/api/v2");
    }
}
