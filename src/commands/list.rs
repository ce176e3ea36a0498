use std::collections::HashMap;

use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, build_controller, entry_to_json, format_grid, resolve_colors};
use crate::cli::OutputOptions;
use crate::config::Config;
use crate::error::{PokedexError, Result};

/// Load up to `pages` pages and print them as a two-column grid
pub async fn cmd_list(pages: u32, colors: bool, output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let controller = build_controller(&config)?;

    for _ in 0..pages {
        controller.load_next_page().await;
        let (error, end_reached) =
            controller.with_state(|s| (s.last_error().map(str::to_string), s.end_reached()));
        if let Some(error) = error {
            return Err(PokedexError::Other(format!("{error} (run again to retry)")));
        }
        if end_reached {
            break;
        }
    }

    let state = controller.snapshot();
    let entries = state.loaded_entries();
    let palette = if colors {
        resolve_colors(&controller, entries).await
    } else {
        HashMap::new()
    };

    let json_output = json!({
        "entries": entries
            .iter()
            .map(|e| entry_to_json(e, palette.get(&e.number)))
            .collect::<Vec<_>>(),
        "page_size": controller.options().page_size,
        "total_count": state.total_count(),
        "next_offset": state.next_offset(),
        "end_reached": state.end_reached(),
    });

    let mut text = format_grid(entries, &palette);
    text.push('\n');
    let footer = if state.end_reached() {
        format!("Showing all {} Pokémon", entries.len())
    } else {
        format!(
            "Showing {} of {} Pokémon (--pages {} for more)",
            entries.len(),
            state.total_count(),
            pages + 1
        )
    };
    text.push_str(&footer.dimmed().to_string());

    CommandOutput::new(json_output).with_text(text).print(output)
}
