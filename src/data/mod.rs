//! Response models for the PokeAPI location endpoints
//!
//! Only the fields the command loop prints or pages with are modeled; any other
//! fields in the JSON are ignored during deserialization.

pub mod pokeapi;

pub use pokeapi::{ApiError, PokeApiClient, POKEAPI_BASE_URL};

use serde::Deserialize;

/// A name plus the URL of the full resource
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// One page of the `location-area` listing
#[derive(Debug, Clone, Deserialize)]
pub struct LocationAreaPage {
    /// Total number of location areas across all pages
    pub count: u32,
    /// URL of the following page, `None` on the last page
    pub next: Option<String>,
    /// URL of the preceding page, `None` on the first page
    pub previous: Option<String>,
    /// Location areas on this page
    pub results: Vec<NamedResource>,
}

/// A single location area and the Pokemon that can be encountered there
#[derive(Debug, Clone, Deserialize)]
pub struct LocationArea {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub pokemon_encounters: Vec<PokemonEncounter>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonEncounter {
    pub pokemon: NamedResource,
}
