//! Configuration commands.
//!
//! - `config show`: Display current configuration
//! - `config get`: Print one value
//! - `config set`: Validate and persist one value

use owo_colors::OwoColorize;
use serde_json::json;

use super::CommandOutput;
use crate::cli::OutputOptions;
use crate::config::{API_URL_ENV, ARTWORK_URL_ENV, CONFIG_KEYS, Config};
use crate::error::{PokedexError, Result};

/// Reject dotted or dashed spellings with a hint at the real key
fn validate_config_key(key: &str) -> Result<&str> {
    if CONFIG_KEYS.contains(&key) {
        return Ok(key);
    }

    let normalized = key.replace(['.', '-'], "_");
    if CONFIG_KEYS.contains(&normalized.as_str()) {
        return Err(PokedexError::Config(format!(
            "invalid config key '{key}'. Use underscores: '{normalized}'"
        )));
    }

    Err(PokedexError::Config(format!(
        "unknown config key '{key}'. Valid keys: {}",
        CONFIG_KEYS.join(", ")
    )))
}

/// Show current configuration
pub fn cmd_config_show(output: OutputOptions) -> Result<()> {
    let config = Config::load()?;
    let config_path = Config::config_path()?;

    let json_output = json!({
        "api_base_url": config.api_base_url(),
        "artwork_base_url": config.artwork_base_url(),
        "page_size": config.page_size,
        "search_index_limit": config.search_index_limit,
        "request_timeout": config.request_timeout,
        "config_file": config_path.to_string_lossy(),
    });

    let mut text_output = format!("{}\n\n", "Configuration:".cyan().bold());
    for key in CONFIG_KEYS {
        let value = config.get(key)?;
        text_output.push_str(&format!("{}: {}", key.cyan(), value));
        if overridden_by_env(key) {
            text_output.push_str(&format!(" {}", "(from environment)".dimmed()));
        }
        text_output.push('\n');
    }

    text_output.push('\n');
    text_output.push_str(&format!(
        "{}",
        format!("Config file: {}", config_path.display()).dimmed()
    ));

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output)
}

/// Set a configuration value
pub fn cmd_config_set(key: &str, value: &str, output: OutputOptions) -> Result<()> {
    validate_config_key(key)?;

    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    let stored = config.get(key)?;
    let json_output = json!({
        "action": "config_set",
        "key": key,
        "value": stored,
        "success": true,
    });
    let mut text_output = format!("Set {} to {}", key.cyan(), stored);
    if overridden_by_env(key) {
        text_output.push_str(&format!(
            "\n{}",
            "Note: an environment variable currently overrides this value".yellow()
        ));
    }

    CommandOutput::new(json_output)
        .with_text(text_output)
        .print(output)
}

/// Get a specific configuration value
pub fn cmd_config_get(key: &str, output: OutputOptions) -> Result<()> {
    validate_config_key(key)?;

    let config = Config::load()?;
    let value = config.get(key)?;

    let json_output = json!({
        "key": key,
        "value": value,
        "from_environment": overridden_by_env(key),
    });

    CommandOutput::new(json_output)
        .with_text(value)
        .print(output)
}

fn overridden_by_env(key: &str) -> bool {
    let var = match key {
        "api_base_url" => API_URL_ENV,
        "artwork_base_url" => ARTWORK_URL_ENV,
        _ => return false,
    };
    std::env::var(var).is_ok_and(|v| !v.trim().is_empty())
}
