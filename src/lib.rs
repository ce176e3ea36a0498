pub mod catalog;
pub mod cli;
pub mod color;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;

#[cfg(test)]
mod test_guards;

pub use catalog::{
    CatalogAccessor, CatalogEntry, CatalogItem, CatalogPage, PokeApiClient, PokemonDetail,
    artwork_url, parse_id,
};
pub use config::Config;
pub use controller::{ListController, ListOptions, ListState, filter_entries};
pub use error::{PokedexError, Result};
pub use pokedex_palette::Rgb;
