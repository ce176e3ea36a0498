use serde::Serialize;

use super::{CatalogItem, artwork_url, parse_id};
use crate::error::Result;

/// A Pokémon as shown on a list card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub name: String,
    pub image_url: String,
    pub number: u32,
}

impl CatalogEntry {
    pub fn from_item(item: &CatalogItem, artwork_base: &str) -> Result<Self> {
        let number = parse_id(&item.url)?;
        Ok(Self {
            name: item.name.clone(),
            image_url: artwork_url(artwork_base, number),
            number,
        })
    }

    /// Name with the first character upper-cased, e.g. `Mr-mime`
    pub fn display_name(&self) -> String {
        capitalize(&self.name)
    }
}

/// Upper-case the first character of `name`
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert listing items into entries, skipping any whose URL has no number.
pub fn entries_from_items(items: &[CatalogItem], artwork_base: &str) -> Vec<CatalogEntry> {
    items
        .iter()
        .filter_map(|item| match CatalogEntry::from_item(item, artwork_base) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping catalog item '{}': {}", item.name, e);
                None
            }
        })
        .collect()
}
