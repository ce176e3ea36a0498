mod color;
mod config;
mod list;
mod search;
mod show;

pub use color::cmd_color;
pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use list::cmd_list;
pub use search::cmd_search;
pub use show::cmd_show;

use std::collections::HashMap;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use pokedex_palette::Rgb;
use serde_json::json;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::catalog::{CatalogAccessor, CatalogEntry, PokeApiClient};
use crate::cli::OutputOptions;
use crate::config::Config;
use crate::controller::{ListController, ListOptions};
use crate::error::{PokedexError, Result};

/// Artwork downloads in flight at once when resolving colors
const COLOR_CONCURRENCY: usize = 8;

/// Paired JSON and human-readable output for a command
pub struct CommandOutput {
    json: serde_json::Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: serde_json::Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn print(self, output: OutputOptions) -> Result<()> {
        match self.text {
            Some(text) if !output.json => println!("{text}"),
            _ => print_json(&self.json)?,
        }
        Ok(())
    }
}

pub fn print_json(value: &serde_json::Value) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| PokedexError::Other(format!("failed to encode JSON: {e}")))?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn build_controller(config: &Config) -> Result<ListController<PokeApiClient>> {
    let client = PokeApiClient::from_config(config)?;
    Ok(ListController::new(
        Arc::new(client),
        ListOptions::from_config(config),
    ))
}

/// Resolve artwork colors for `entries` concurrently. Entries whose artwork
/// fails to download or decode are left out and render with no color.
pub(crate) async fn resolve_colors<A: CatalogAccessor>(
    controller: &ListController<A>,
    entries: &[CatalogEntry],
) -> HashMap<u32, Rgb> {
    stream::iter(entries.iter().cloned())
        .map(|entry| async move {
            let mut resolved = None;
            match controller.accessor().fetch_artwork(&entry.image_url).await {
                Ok(bytes) => {
                    controller
                        .resolve_artwork_color(bytes, |color| resolved = Some(color))
                        .await
                }
                Err(e) => tracing::warn!("Failed to fetch artwork for {}: {}", entry.name, e),
            }
            (entry.number, resolved)
        })
        .buffer_unordered(COLOR_CONCURRENCY)
        .filter_map(|(number, color)| async move { color.map(|c| (number, c)) })
        .collect()
        .await
}

fn card_text(entry: &CatalogEntry, color: Option<&Rgb>) -> String {
    let mut text = format!("#{:03} {}", entry.number, entry.display_name());
    if let Some(color) = color {
        text.push_str(&format!("\n{color}"));
    }
    text
}

/// Render entries as cards, two per row
pub fn format_grid(entries: &[CatalogEntry], colors: &HashMap<u32, Rgb>) -> String {
    let mut builder = Builder::default();
    for row in entries.chunks(2) {
        let mut cells: Vec<String> = row
            .iter()
            .map(|entry| card_text(entry, colors.get(&entry.number)))
            .collect();
        if cells.len() == 1 {
            cells.push(String::new());
        }
        builder.push_record(cells);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

pub fn entry_to_json(entry: &CatalogEntry, color: Option<&Rgb>) -> serde_json::Value {
    json!({
        "number": entry.number,
        "name": entry.name,
        "image_url": entry.image_url,
        "color": color.map(|c| c.hex()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(number: u32, name: &str) -> CatalogEntry {
        CatalogEntry {
            name: name.to_string(),
            image_url: format!("https://img.example.com/{number}.png"),
            number,
        }
    }

    #[test]
    fn test_card_text() {
        assert_eq!(card_text(&entry(7, "squirtle"), None), "#007 Squirtle");
        assert_eq!(
            card_text(&entry(7, "squirtle"), Some(&Rgb::new(0x68, 0x90, 0xf0))),
            "#007 Squirtle\n#6890f0"
        );
    }

    #[test]
    fn test_grid_places_two_cards_per_row() {
        let entries = vec![entry(1, "bulbasaur"), entry(2, "ivysaur"), entry(3, "venusaur")];
        let grid = format_grid(&entries, &HashMap::new());

        let lines: Vec<&str> = grid.lines().collect();
        let first_row = lines.iter().find(|l| l.contains("Bulbasaur")).unwrap();
        assert!(first_row.contains("Ivysaur"));
        let second_row = lines.iter().find(|l| l.contains("Venusaur")).unwrap();
        assert!(!second_row.contains("Ivysaur"));
    }

    #[test]
    fn test_entry_json() {
        let value = entry_to_json(&entry(25, "pikachu"), Some(&Rgb::new(248, 208, 48)));
        assert_eq!(value["number"], 25);
        assert_eq!(value["name"], "pikachu");
        assert_eq!(value["color"], "#f8d030");

        let value = entry_to_json(&entry(25, "pikachu"), None);
        assert!(value["color"].is_null());
    }
}
