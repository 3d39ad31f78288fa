//! Service configuration from environment variables

use pokeapi_client::PokeApiClient;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CACHE_PATH: &str = "poke_cache.sqlite";
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub port: u16,
    pub cache_path: PathBuf,
    pub pokeapi_base_url: String,
    pub remote_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            pokeapi_base_url: PokeApiClient::BASE_URL.to_string(),
            remote_timeout: Duration::from_secs(DEFAULT_REMOTE_TIMEOUT_SECS),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unparseable numbers fall back
    /// to the defaults.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = var("PORT")
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let cache_path = var("POKE_CACHE_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.cache_path);

        let pokeapi_base_url = var("POKEAPI_BASE_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.pokeapi_base_url);

        let remote_timeout = var("REMOTE_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.remote_timeout);

        Self {
            port,
            cache_path,
            pokeapi_base_url,
            remote_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_map(pairs: &[(&str, &str)]) -> ServiceConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = from_map(&[]);
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.port, 3000);
        assert_eq!(config.cache_path, PathBuf::from("poke_cache.sqlite"));
        assert_eq!(config.pokeapi_base_url, "https://pokeapi.co/api/v2");
        assert_eq!(config.remote_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = from_map(&[
            ("PORT", "8080"),
            ("POKE_CACHE_PATH", "/var/lib/pokedex/cache.sqlite"),
            ("POKEAPI_BASE_URL", "http://localhost:9000/api/v2"),
            ("REMOTE_TIMEOUT_SECS", "5"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.cache_path,
            PathBuf::from("/var/lib/pokedex/cache.sqlite")
        );
        assert_eq!(config.pokeapi_base_url, "http://localhost:9000/api/v2");
        assert_eq!(config.remote_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_bad_numbers_fall_back() {
        let config = from_map(&[("PORT", "http"), ("REMOTE_TIMEOUT_SECS", "0")]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(
            config.remote_timeout,
            Duration::from_secs(DEFAULT_REMOTE_TIMEOUT_SECS)
        );
    }
}
