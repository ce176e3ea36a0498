use owo_colors::OwoColorize;
use pokedex_palette::Rgb;
use serde_json::json;

use super::CommandOutput;
use super::color::format_color;
use crate::catalog::{CatalogAccessor, PokeApiClient, PokemonDetail, artwork_url, capitalize};
use crate::cli::OutputOptions;
use crate::color::dominant_color;
use crate::config::Config;
use crate::error::Result;

/// Display the detail record for one Pokémon
pub async fn cmd_show(name: &str, output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let client = PokeApiClient::from_config(&config)?;

    let detail = client.fetch_detail(name).await?;
    let image_url = artwork_url(&config.artwork_base_url(), detail.id);
    let color = artwork_color(&client, &image_url).await;

    let json_output = json!({
        "id": detail.id,
        "name": detail.name,
        "types": detail.type_names(),
        "height": detail.height,
        "weight": detail.weight,
        "base_experience": detail.base_experience,
        "stats": detail
            .stats
            .iter()
            .map(|s| json!({ "name": s.stat.name, "base_stat": s.base_stat }))
            .collect::<Vec<_>>(),
        "image_url": image_url,
        "color": color.map(|c| c.hex()),
    });

    let text = format_detail(&detail, &image_url, color.as_ref());
    CommandOutput::new(json_output).with_text(text).print(output)
}

/// Dominant artwork color; the detail view still renders without one.
async fn artwork_color(client: &PokeApiClient, image_url: &str) -> Option<Rgb> {
    let bytes = match client.fetch_artwork(image_url).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Failed to fetch artwork {image_url}: {e}");
            return None;
        }
    };
    match dominant_color(bytes).await {
        Ok(color) => color,
        Err(e) => {
            tracing::warn!("Could not resolve artwork color: {e}");
            None
        }
    }
}

fn format_detail(detail: &PokemonDetail, image_url: &str, color: Option<&Rgb>) -> String {
    let mut text = format!(
        "{} {}\n\n",
        format!("#{:03}", detail.id).dimmed(),
        capitalize(&detail.name).bold()
    );

    text.push_str(&format!(
        "{}: {}\n",
        "Types".cyan(),
        detail.type_names().join(", ")
    ));
    // PokeAPI reports decimetres and hectograms
    text.push_str(&format!(
        "{}: {:.1} m\n",
        "Height".cyan(),
        f64::from(detail.height) / 10.0
    ));
    text.push_str(&format!(
        "{}: {:.1} kg\n",
        "Weight".cyan(),
        f64::from(detail.weight) / 10.0
    ));
    if let Some(exp) = detail.base_experience {
        text.push_str(&format!("{}: {}\n", "Base experience".cyan(), exp));
    }
    if let Some(color) = color {
        text.push_str(&format!("{}: {}\n", "Color".cyan(), format_color(color)));
    }

    if !detail.stats.is_empty() {
        text.push_str(&format!("\n{}:\n", "Stats".cyan()));
        for stat in &detail.stats {
            text.push_str(&format!("  {:<16} {:>3}\n", stat.stat.name, stat.base_stat));
        }
    }

    text.push_str(&format!("\n{}", format!("Artwork: {image_url}").dimmed()));
    text
}
