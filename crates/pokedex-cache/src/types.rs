//! Request and response types for the HTTP surface

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query string for `GET /pokemon/{identifier}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PokemonQuery {
    #[serde(rename = "includeRaw", alias = "includeRawPayload", default)]
    pub include_raw: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonResponse {
    pub summary: String,
    /// Pokédex card with height, weight and description
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_payload: Option<Value>,
}

/// Statistics about the cache
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: u64,
    pub hits: u64,
    pub misses: u64,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
    pub cache: CacheStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_payload_omitted_when_absent() {
        let body = serde_json::to_value(PokemonResponse {
            summary: "Pikachu (#25)".to_string(),
            details: "# Pikachu (#25)".to_string(),
            raw_payload: None,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({ "summary": "Pikachu (#25)", "details": "# Pikachu (#25)" })
        );
    }

    #[test]
    fn test_raw_payload_is_camel_case() {
        let body = serde_json::to_value(PokemonResponse {
            summary: String::new(),
            details: String::new(),
            raw_payload: Some(json!({ "id": 25 })),
        })
        .unwrap();
        assert_eq!(body["rawPayload"]["id"], 25);
    }

    #[test]
    fn test_query_accepts_both_flag_names() {
        let short: PokemonQuery = serde_json::from_value(json!({ "includeRaw": true })).unwrap();
        let long: PokemonQuery =
            serde_json::from_value(json!({ "includeRawPayload": true })).unwrap();
        let absent: PokemonQuery = serde_json::from_value(json!({})).unwrap();
        assert!(short.include_raw);
        assert!(long.include_raw);
        assert!(!absent.include_raw);
    }
}
