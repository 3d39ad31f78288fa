//! Typed views over PokéAPI responses
//!
//! Only the fields this workspace reads are modelled. Everything else in the
//! upstream body is ignored on parse but survives in the raw JSON value the
//! client hands back.

use crate::error::{PokeApiError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A `{ name, url }` reference to another API resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Pokémon from `/pokemon/{id or name}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    /// Decimetres
    #[serde(default)]
    pub height: Option<u32>,
    /// Hectograms
    #[serde(default)]
    pub weight: Option<u32>,
    /// `None` when the upstream body has no `types` field at all
    #[serde(default)]
    pub types: Option<Vec<TypeSlot>>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub stats: Option<Vec<StatEntry>>,
}

impl Pokemon {
    /// Parse a raw `/pokemon` payload, rejecting bodies without `id` and `name`
    pub fn from_payload(value: &Value) -> Result<Self> {
        Pokemon::deserialize(value)
            .map_err(|e| PokeApiError::Malformed(format!("not a pokemon payload: {}", e)))
    }

    /// Base stat value by stat name (e.g. `"special-attack"`)
    pub fn base_stat(&self, name: &str) -> Option<u32> {
        self.stats
            .iter()
            .flatten()
            .find(|s| s.stat.name == name)
            .map(|s| s.base_stat)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySlot {
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub slot: u8,
    pub ability: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntry {
    pub base_stat: u32,
    #[serde(default)]
    pub effort: u32,
    pub stat: NamedResource,
}

/// Species from `/pokemon-species/{id or name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonSpecies {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
}

impl PokemonSpecies {
    pub fn from_payload(value: &Value) -> Result<Self> {
        PokemonSpecies::deserialize(value)
            .map_err(|e| PokeApiError::Malformed(format!("not a species payload: {}", e)))
    }

    /// First English Pokédex entry with the game's hard line and page breaks
    /// turned into spaces
    pub fn english_flavor_text(&self) -> Option<String> {
        self.flavor_text_entries
            .iter()
            .find(|entry| entry.language.name == "en")
            .map(|entry| entry.flavor_text.replace(['\n', '\u{c}'], " "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorTextEntry {
    pub flavor_text: String,
    pub language: NamedResource,
}

/// Type from `/type/{id or name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeResource {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub pokemon: Vec<TypeMember>,
}

impl TypeResource {
    pub fn from_payload(value: &Value) -> Result<Self> {
        TypeResource::deserialize(value)
            .map_err(|e| PokeApiError::Malformed(format!("not a type payload: {}", e)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMember {
    pub slot: u8,
    pub pokemon: NamedResource,
}

/// Generation from `/generation/{id or name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub pokemon_species: Vec<NamedResource>,
}

impl Generation {
    pub fn from_payload(value: &Value) -> Result<Self> {
        Generation::deserialize(value)
            .map_err(|e| PokeApiError::Malformed(format!("not a generation payload: {}", e)))
    }
}
