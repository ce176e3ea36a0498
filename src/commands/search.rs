use std::collections::HashMap;

use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, build_controller, entry_to_json, format_grid, resolve_colors};
use crate::cli::OutputOptions;
use crate::config::Config;
use crate::error::{PokedexError, Result};

/// Search the full catalog by name fragment or number
pub async fn cmd_search(query: &str, colors: bool, output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let controller = build_controller(&config)?;

    controller.load_search_index().await;
    if let Some(error) = controller.with_state(|s| s.index_error().map(str::to_string)) {
        return Err(PokedexError::Other(format!(
            "failed to load the search index: {error}"
        )));
    }

    controller.search(query);
    let state = controller.snapshot();
    let matches = state.visible_entries();
    let palette = if colors {
        resolve_colors(&controller, matches).await
    } else {
        HashMap::new()
    };

    let json_output = json!({
        "query": query,
        "matches": matches
            .iter()
            .map(|e| entry_to_json(e, palette.get(&e.number)))
            .collect::<Vec<_>>(),
    });

    let text = if matches.is_empty() {
        format!("No Pokémon match '{}'", query.trim())
    } else {
        let count = format!("{} match(es)", matches.len());
        format!("{}\n{}", format_grid(matches, &palette), count.dimmed())
    };

    CommandOutput::new(json_output).with_text(text).print(output)
}
