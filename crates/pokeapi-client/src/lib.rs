//! Rust client for the [PokéAPI](https://pokeapi.co)
//!
//! The client is deliberately thin: every call returns the upstream JSON body
//! as a [`serde_json::Value`] so callers can persist it verbatim, and the typed
//! views in [`types`] are parsed from that value on demand.
//!
//! # Example
//!
//! ```no_run
//! use pokeapi_client::{PokeApiClient, Pokemon};
//!
//! # async fn example() -> Result<(), pokeapi_client::PokeApiError> {
//! let client = PokeApiClient::new()?;
//!
//! let raw = client.get_pokemon("charizard").await?;
//! let pokemon = Pokemon::from_payload(&raw)?;
//! println!("{} is #{}", pokemon.name, pokemon.id);
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - `GET /pokemon/{id or name}`
//! - `GET /pokemon-species/{id or name}`
//! - `GET /type/{id or name}`
//! - `GET /generation/{id or name}`

mod client;
mod error;
pub mod types;

pub use client::PokeApiClient;
pub use error::{PokeApiError, Result};
pub use types::{
    AbilitySlot, FlavorTextEntry, Generation, NamedResource, Pokemon, PokemonSpecies, StatEntry,
    TypeMember, TypeResource, TypeSlot,
};
