//! Error types for the PokéAPI client

use std::fmt;

/// Errors that can occur when talking to the PokéAPI
///
/// The three variants are the whole taxonomy callers need to distinguish:
/// an unknown identifier, an upstream that could not be reached, and a body
/// that could not be understood.
#[derive(Debug)]
pub enum PokeApiError {
    /// The API answered 404 for the requested resource path
    NotFound(String),
    /// Transport failure, timeout, or an upstream server error
    Unreachable(String),
    /// The response body was not the JSON shape we expected
    Malformed(String),
}

impl PokeApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }
}

impl fmt::Display for PokeApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(resource) => write!(f, "PokéAPI resource not found: {}", resource),
            Self::Unreachable(msg) => write!(f, "PokéAPI unreachable: {}", msg),
            Self::Malformed(msg) => write!(f, "PokéAPI malformed response: {}", msg),
        }
    }
}

impl std::error::Error for PokeApiError {}

impl From<reqwest::Error> for PokeApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Malformed(e.to_string())
        } else {
            Self::Unreachable(e.to_string())
        }
    }
}

impl From<serde_json::Error> for PokeApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Malformed(e.to_string())
    }
}

/// Result type for PokéAPI operations
pub type Result<T> = std::result::Result<T, PokeApiError>;
