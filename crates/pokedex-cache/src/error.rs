//! Error types for the Pokédex cache service

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pokeapi_client::PokeApiError;
use pokedex_store::StoreError;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum CacheError {
    /// The lookup identifier was empty after trimming
    InvalidIdentifier,
    /// Region name with no generation mapping
    UnknownRegion(String),
    /// Durable store failure (open or single operation)
    Store(StoreError),
    /// A stored payload no longer parses
    CorruptRecord { key: String, reason: String },
    /// Upstream reports the identifier does not exist
    RemoteNotFound(String),
    /// Upstream could not be reached or timed out
    RemoteUnreachable(String),
    /// Upstream answered with something we could not parse
    MalformedResponse(String),
    /// Configuration error
    Config(String),
}

impl CacheError {
    /// Which stage of a lookup failed, as reported to callers
    pub fn stage(&self) -> &'static str {
        match self {
            Self::InvalidIdentifier | Self::Config(_) => "request",
            Self::Store(_) | Self::CorruptRecord { .. } => "store",
            Self::RemoteNotFound(_) | Self::UnknownRegion(_) => "not_found",
            Self::RemoteUnreachable(_) | Self::MalformedResponse(_) => "remote",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidIdentifier => StatusCode::BAD_REQUEST,
            Self::UnknownRegion(_) | Self::RemoteNotFound(_) => StatusCode::NOT_FOUND,
            Self::RemoteUnreachable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            Self::Store(_) | Self::CorruptRecord { .. } | Self::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIdentifier => write!(f, "Identifier is required"),
            Self::UnknownRegion(region) => write!(
                f,
                "Unknown region: {}. Available regions are: {}",
                region,
                crate::random::region_names().join(", ")
            ),
            Self::Store(e) => write!(f, "{}", e),
            Self::CorruptRecord { key, reason } => {
                write!(f, "Corrupt cache record {}: {}", key, reason)
            }
            Self::RemoteNotFound(msg) => write!(f, "No such entity: {}", msg),
            Self::RemoteUnreachable(msg) => write!(f, "Remote source unavailable: {}", msg),
            Self::MalformedResponse(msg) => write!(f, "Malformed remote response: {}", msg),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for CacheError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<PokeApiError> for CacheError {
    fn from(e: PokeApiError) -> Self {
        match e {
            PokeApiError::NotFound(resource) => Self::RemoteNotFound(resource),
            PokeApiError::Unreachable(msg) => Self::RemoteUnreachable(msg),
            PokeApiError::Malformed(msg) => Self::MalformedResponse(msg),
        }
    }
}

impl From<tracing_subscriber::filter::ParseError> for CacheError {
    fn from(e: tracing_subscriber::filter::ParseError) -> Self {
        Self::Config(e.to_string())
    }
}

impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            Self::Store(_) | Self::CorruptRecord { .. } | Self::Config(_) => {
                tracing::error!(error = %self, "Internal cache error");
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (
            status,
            axum::Json(json!({ "error": message, "stage": self.stage() })),
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;
