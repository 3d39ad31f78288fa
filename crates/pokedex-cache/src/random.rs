//! Random Pokémon lookups: by national dex number, by region, or by type
//!
//! Region and type membership lists are PokéAPI resources in their own right
//! and go through the same cache as Pokémon records.

use crate::error::{CacheError, Result};
use crate::fetcher::{CachedFetcher, Fetched, Namespace};
use pokeapi_client::{Generation, NamedResource, TypeResource};
use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::debug;

/// Highest dex number drawn by [`CachedFetcher::random`]
pub const RANDOM_ID_MAX: u32 = 1000;

/// Regions in generation order
const REGIONS: &[(&str, u32)] = &[
    ("kanto", 1),
    ("johto", 2),
    ("hoenn", 3),
    ("sinnoh", 4),
    ("unova", 5),
    ("kalos", 6),
    ("alola", 7),
    ("galar", 8),
    ("paldea", 9),
];

pub fn region_names() -> Vec<&'static str> {
    REGIONS.iter().map(|(name, _)| *name).collect()
}

pub fn generation_for_region(region: &str) -> Option<u32> {
    let region = region.trim().to_lowercase();
    REGIONS
        .iter()
        .find(|(name, _)| *name == region)
        .map(|(_, generation)| *generation)
}

/// Trailing numeric segment of a PokéAPI resource URL, e.g. `.../pokemon-species/25/`
fn resource_id(url: &str) -> Option<u32> {
    url.trim_end_matches('/').rsplit('/').next()?.parse().ok()
}

/// Identifier to look a listed resource up by, preferring its dex number
fn lookup_identifier(resource: &NamedResource) -> String {
    resource_id(&resource.url)
        .map(|id| id.to_string())
        .unwrap_or_else(|| resource.name.clone())
}

impl CachedFetcher {
    /// A Pokémon picked uniformly from dex numbers `1..=RANDOM_ID_MAX`
    pub async fn random(&self) -> Result<Fetched> {
        self.random_up_to(RANDOM_ID_MAX).await
    }

    pub async fn random_up_to(&self, max_id: u32) -> Result<Fetched> {
        let id = rand::rng().random_range(1..=max_id.max(1));
        debug!(id, "Picked random Pokémon");
        self.fetch(&id.to_string()).await
    }

    /// A random species introduced in `region`'s generation
    pub async fn random_from_region(&self, region: &str) -> Result<Fetched> {
        let generation = generation_for_region(region)
            .ok_or_else(|| CacheError::UnknownRegion(region.trim().to_string()))?;

        let raw = self
            .fetch_resource(Namespace::Generation, &generation.to_string())
            .await?;
        let generation = Generation::from_payload(&raw)?;

        let identifier = generation
            .pokemon_species
            .choose(&mut rand::rng())
            .map(lookup_identifier)
            .ok_or_else(|| {
                CacheError::RemoteNotFound(format!("no species listed for {}", generation.name))
            })?;
        debug!(region, identifier = %identifier, "Picked random Pokémon from region");
        self.fetch(&identifier).await
    }

    /// A random Pokémon having `kind` among its types
    pub async fn random_by_type(&self, kind: &str) -> Result<Fetched> {
        let raw = self.fetch_resource(Namespace::Type, kind).await?;
        let resource = TypeResource::from_payload(&raw)?;

        let identifier = resource
            .pokemon
            .choose(&mut rand::rng())
            .map(|member| lookup_identifier(&member.pokemon))
            .ok_or_else(|| {
                CacheError::RemoteNotFound(format!("no Pokémon of type {}", resource.name))
            })?;
        debug!(kind, identifier = %identifier, "Picked random Pokémon by type");
        self.fetch(&identifier).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::tests::{fetcher_with, FakeSource};
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_region_mapping() {
        assert_eq!(generation_for_region("kanto"), Some(1));
        assert_eq!(generation_for_region(" Paldea "), Some(9));
        assert_eq!(generation_for_region("hisui"), None);
        assert_eq!(region_names().len(), 9);
        assert_eq!(region_names()[0], "kanto");
    }

    #[test]
    fn test_resource_id_from_url() {
        assert_eq!(
            resource_id("https://pokeapi.co/api/v2/pokemon-species/25/"),
            Some(25)
        );
        assert_eq!(resource_id("https://pokeapi.co/api/v2/pokemon/6"), Some(6));
        assert_eq!(resource_id(""), None);

        let unnumbered = NamedResource {
            name: "mew".to_string(),
            url: String::new(),
        };
        assert_eq!(lookup_identifier(&unnumbered), "mew");
    }

    #[tokio::test]
    async fn test_random_stays_in_range() {
        let source = Arc::new(FakeSource::with_pokemon(&[
            (1, "bulbasaur"),
            (2, "ivysaur"),
            (3, "venusaur"),
        ]));
        let (_dir, fetcher) = fetcher_with(source).await;

        for _ in 0..10 {
            let fetched = fetcher.random_up_to(3).await.unwrap();
            assert!((1..=3).contains(&fetched.pokemon.id));
        }
        assert!(fetcher.store().count().await.unwrap() <= 3);
    }

    #[tokio::test]
    async fn test_random_from_region_uses_cached_generation() {
        let source = Arc::new(FakeSource::with_pokemon(&[(1, "bulbasaur"), (4, "charmander")]));
        source.add_resource(
            "generation/1",
            json!({
                "id": 1,
                "name": "generation-i",
                "pokemon_species": [
                    { "name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon-species/1/" },
                    { "name": "charmander", "url": "https://pokeapi.co/api/v2/pokemon-species/4/" }
                ]
            }),
        );
        let (_dir, fetcher) = fetcher_with(source.clone()).await;

        let first = fetcher.random_from_region("Kanto").await.unwrap();
        assert!([1, 4].contains(&first.pokemon.id));
        assert!(fetcher.store().get("generation/1").await.unwrap().is_found());

        fetcher.random_from_region("kanto").await.unwrap();
        let generation_calls = source
            .calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with("generation/"))
            .count();
        assert_eq!(generation_calls, 1);
    }

    #[tokio::test]
    async fn test_unknown_region_makes_no_remote_call() {
        let source = Arc::new(FakeSource::default());
        let (_dir, fetcher) = fetcher_with(source.clone()).await;

        let err = fetcher.random_from_region("hisui").await.unwrap_err();
        assert!(matches!(err, CacheError::UnknownRegion(ref r) if r == "hisui"));
        assert_eq!(err.stage(), "not_found");
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_random_by_type() {
        let source = Arc::new(FakeSource::with_pokemon(&[(6, "charizard")]));
        source.add_resource(
            "type/fire",
            json!({
                "id": 10,
                "name": "fire",
                "pokemon": [
                    { "slot": 1, "pokemon": { "name": "charizard", "url": "https://pokeapi.co/api/v2/pokemon/6/" } }
                ]
            }),
        );
        let (_dir, fetcher) = fetcher_with(source).await;

        let fetched = fetcher.random_by_type("FIRE").await.unwrap();
        assert_eq!(fetched.pokemon.name, "charizard");
        assert!(fetcher.store().get("type/fire").await.unwrap().is_found());
    }

    #[tokio::test]
    async fn test_empty_type_is_not_found() {
        let source = Arc::new(FakeSource::default());
        source.add_resource("type/stellar", json!({ "id": 19, "name": "stellar", "pokemon": [] }));
        let (_dir, fetcher) = fetcher_with(source).await;

        let err = fetcher.random_by_type("stellar").await.unwrap_err();
        assert!(matches!(err, CacheError::RemoteNotFound(_)));
    }

    #[tokio::test]
    async fn test_unknown_type_propagates_not_found() {
        let source = Arc::new(FakeSource::default());
        let (_dir, fetcher) = fetcher_with(source).await;

        let err = fetcher.random_by_type("shadowy").await.unwrap_err();
        assert!(matches!(err, CacheError::RemoteNotFound(_)));
        assert_eq!(fetcher.store().count().await.unwrap(), 0);
    }
}
