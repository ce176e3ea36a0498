use std::path::Path;

use owo_colors::OwoColorize;
use pokedex_palette::Rgb;
use serde_json::json;

use super::CommandOutput;
use crate::catalog::{CatalogAccessor, PokeApiClient, artwork_url};
use crate::cli::OutputOptions;
use crate::color::dominant_color;
use crate::config::Config;
use crate::error::{PokedexError, Result};

/// Print the dominant color of a Pokémon's artwork, or of a local image file
pub async fn cmd_color(
    name: Option<&str>,
    file: Option<&Path>,
    output: OutputOptions,
) -> Result<()> {
    let (source, bytes) = match (file, name) {
        (Some(path), _) => {
            let bytes = tokio::fs::read(path).await.map_err(|e| {
                PokedexError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to read image at {}: {}", path.display(), e),
                ))
            })?;
            (path.display().to_string(), bytes)
        }
        (None, Some(name)) => {
            let config = Config::load()?;
            let client = PokeApiClient::from_config(&config)?;
            let detail = client.fetch_detail(name).await?;
            let url = artwork_url(&config.artwork_base_url(), detail.id);
            let bytes = client.fetch_artwork(&url).await?;
            (url, bytes)
        }
        (None, None) => {
            return Err(PokedexError::Other(
                "either a name or --file is required".to_string(),
            ));
        }
    };

    let color = dominant_color(bytes).await?.ok_or_else(|| {
        PokedexError::Other(format!("{source} has no opaque pixels to sample"))
    })?;

    let json_output = json!({
        "source": source,
        "hex": color.hex(),
        "argb": format!("{:#010x}", color.to_argb()),
        "rgb": [color.r, color.g, color.b],
    });

    CommandOutput::new(json_output)
        .with_text(format_color(&color))
        .print(output)
}

pub(super) fn format_color(color: &Rgb) -> String {
    format!(
        "{} {}  {}",
        "      ".on_truecolor(color.r, color.g, color.b),
        color.hex().bold(),
        format!("rgb({}, {}, {})", color.r, color.g, color.b).dimmed()
    )
}
