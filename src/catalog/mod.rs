//! Remote catalog access.
//!
//! This module wraps the paged listing endpoint and the per-Pokémon detail
//! endpoint of a PokeAPI-compatible REST service and translates responses
//! into typed records. Catalog numbers are never fetched separately: they are
//! parsed from the detail URL every listing item carries.

pub mod client;
pub mod entry;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{PokedexError, Result};

pub use client::PokeApiClient;
pub use entry::{CatalogEntry, capitalize, entries_from_items};

/// One `{name, url}` element of a listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    /// Detail URL, e.g. `https://pokeapi.co/api/v2/pokemon/25/`
    pub url: String,
}

/// Listing response for `GET {base}/pokemon?offset=..&limit=..`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPage {
    /// Total number of entries in the catalog
    pub count: usize,
    pub next: Option<String>,
    #[serde(default)]
    pub previous: serde_json::Value,
    pub results: Vec<CatalogItem>,
}

/// Name plus link, as used by PokeAPI for types and stats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSlot {
    pub base_stat: u32,
    pub stat: NamedResource,
}

/// Detail response for `GET {base}/pokemon/{name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    /// Decimetres
    pub height: u32,
    /// Hectograms
    pub weight: u32,
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
}

impl PokemonDetail {
    /// Type names ordered by slot
    pub fn type_names(&self) -> Vec<&str> {
        let mut slots: Vec<&TypeSlot> = self.types.iter().collect();
        slots.sort_by_key(|t| t.slot);
        slots.into_iter().map(|t| t.kind.name.as_str()).collect()
    }
}

/// Common interface for catalog backends
pub trait CatalogAccessor: Send + Sync {
    /// Fetch `limit` listing items starting at `offset`
    fn fetch_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<CatalogPage>> + Send;

    /// Fetch the detail record for a Pokémon by name (or number)
    fn fetch_detail(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<PokemonDetail>> + Send;

    /// Download raw artwork bytes
    fn fetch_artwork(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

/// Extract the catalog number from a detail URL: the last non-empty path
/// segment, parsed as an integer.
pub fn parse_id(detail_url: &str) -> Result<u32> {
    let url =
        Url::parse(detail_url).map_err(|_| PokedexError::InvalidDetailUrl(detail_url.to_string()))?;

    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
        .and_then(|segment| segment.parse::<u32>().ok())
        .ok_or_else(|| PokedexError::InvalidDetailUrl(detail_url.to_string()))
}

/// Build the artwork URL for a catalog number: `{artwork_base}/{id}.png`
pub fn artwork_url(artwork_base: &str, id: u32) -> String {
    format!("{}/{}.png", artwork_base.trim_end_matches('/'), id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_with_trailing_slash() {
        assert_eq!(parse_id("https://pokeapi.co/api/v2/pokemon/25/").unwrap(), 25);
    }

    #[test]
    fn test_parse_id_without_trailing_slash() {
        assert_eq!(parse_id("https://pokeapi.co/api/v2/pokemon/1").unwrap(), 1);
    }

    #[test]
    fn test_parse_id_ignores_query() {
        assert_eq!(
            parse_id("https://pokeapi.co/api/v2/pokemon/133/?lang=en").unwrap(),
            133
        );
    }

    #[test]
    fn test_parse_id_invalid() {
        assert!(matches!(
            parse_id("https://pokeapi.co/api/v2/pokemon/pikachu/"),
            Err(PokedexError::InvalidDetailUrl(_))
        ));
        assert!(parse_id("https://pokeapi.co/").is_err());
        assert!(parse_id("pokemon/25").is_err());
        assert!(parse_id("").is_err());
    }

    #[test]
    fn test_artwork_url() {
        assert_eq!(
            artwork_url("https://img.example.com/artwork", 7),
            "https://img.example.com/artwork/7.png"
        );
        assert_eq!(
            artwork_url("https://img.example.com/artwork/", 7),
            "https://img.example.com/artwork/7.png"
        );
    }

    #[test]
    fn test_decode_listing_page() {
        let body = r#"{
            "count": 1302,
            "next": "https://pokeapi.co/api/v2/pokemon?offset=20&limit=20",
            "previous": null,
            "results": [
                {"name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/"},
                {"name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/"}
            ]
        }"#;

        let page: CatalogPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.count, 1302);
        assert!(page.next.is_some());
        assert!(page.previous.is_null());
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[1].name, "ivysaur");
    }

    #[test]
    fn test_decode_last_page_has_null_next() {
        let body = r#"{"count": 2, "next": null, "previous": "https://pokeapi.co/api/v2/pokemon?offset=0&limit=1", "results": []}"#;
        let page: CatalogPage = serde_json::from_str(body).unwrap();
        assert!(page.next.is_none());
        assert!(page.previous.is_string());
    }

    #[test]
    fn test_decode_detail_orders_types_by_slot() {
        let body = r#"{
            "id": 6,
            "name": "charizard",
            "height": 17,
            "weight": 905,
            "base_experience": 267,
            "types": [
                {"slot": 2, "type": {"name": "flying", "url": "https://pokeapi.co/api/v2/type/3/"}},
                {"slot": 1, "type": {"name": "fire", "url": "https://pokeapi.co/api/v2/type/10/"}}
            ],
            "stats": [
                {"base_stat": 78, "effort": 0, "stat": {"name": "hp", "url": "https://pokeapi.co/api/v2/stat/1/"}}
            ],
            "sprites": {"front_default": null}
        }"#;

        let detail: PokemonDetail = serde_json::from_str(body).unwrap();
        assert_eq!(detail.id, 6);
        assert_eq!(detail.type_names(), vec!["fire", "flying"]);
        assert_eq!(detail.stats[0].base_stat, 78);
        assert_eq!(detail.stats[0].stat.name, "hp");
    }
}
