//! Top-level application configuration.
//!
//! Configuration is stored in `config.yaml` under the platform config
//! directory (override with `POKEDEX_CONFIG_DIR`) and includes:
//! - Catalog API and artwork base URLs
//! - Page size for incremental loading
//! - Size of the one-shot search index fetch
//! - HTTP request timeout
//!
//! `POKEDEX_API_URL` and `POKEDEX_ARTWORK_URL` take precedence over the file.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{PokedexError, Result};

pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_ARTWORK_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";
pub const DEFAULT_PAGE_SIZE: usize = 20;

pub const CONFIG_DIR_ENV: &str = "POKEDEX_CONFIG_DIR";
pub const API_URL_ENV: &str = "POKEDEX_API_URL";
pub const ARTWORK_URL_ENV: &str = "POKEDEX_ARTWORK_URL";

/// Keys accepted by `config get` / `config set`.
pub const CONFIG_KEYS: &[&str] = &[
    "api_base_url",
    "artwork_base_url",
    "page_size",
    "search_index_limit",
    "request_timeout",
];

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Catalog REST API root (default: PokeAPI v2)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Directory holding `{id}.png` artwork
    #[serde(default = "default_artwork_base_url")]
    pub artwork_base_url: String,

    /// Entries requested per page (default: 20)
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// `limit` used for the full-catalog search index fetch
    #[serde(default = "default_search_index_limit")]
    pub search_index_limit: usize,

    /// HTTP request timeout in seconds (default: 30)
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_artwork_base_url() -> String {
    DEFAULT_ARTWORK_BASE_URL.to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_search_index_limit() -> usize {
    100_000
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            artwork_base_url: default_artwork_base_url(),
            page_size: default_page_size(),
            search_index_limit: default_search_index_limit(),
            request_timeout: default_request_timeout(),
        }
    }
}

fn env_override(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Directory holding `config.yaml`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = env_override(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }
        ProjectDirs::from("", "", "pokedex")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| {
                PokedexError::Config(format!(
                    "could not determine a config directory; set {CONFIG_DIR_ENV}"
                ))
            })
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.yaml"))
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            PokedexError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                PokedexError::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create directory for config at {}: {}",
                        parent.display(),
                        e
                    ),
                ))
            })?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(path, content).map_err(|e| {
            PokedexError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(path, permissions)?;
        }

        Ok(())
    }

    /// Catalog API root, from environment or config file
    pub fn api_base_url(&self) -> String {
        env_override(API_URL_ENV).unwrap_or_else(|| self.api_base_url.clone())
    }

    /// Artwork directory, from environment or config file
    pub fn artwork_base_url(&self) -> String {
        env_override(ARTWORK_URL_ENV).unwrap_or_else(|| self.artwork_base_url.clone())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn validate(&self) -> Result<()> {
        validate_url("api_base_url", &self.api_base_url)?;
        validate_url("artwork_base_url", &self.artwork_base_url)?;
        if self.page_size == 0 {
            return Err(PokedexError::Config(
                "page_size must be greater than 0".to_string(),
            ));
        }
        if self.search_index_limit == 0 {
            return Err(PokedexError::Config(
                "search_index_limit must be greater than 0".to_string(),
            ));
        }
        if self.request_timeout == 0 {
            return Err(PokedexError::Config(
                "request_timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Read a value by key, as shown by `config get`
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "api_base_url" => self.api_base_url(),
            "artwork_base_url" => self.artwork_base_url(),
            "page_size" => self.page_size.to_string(),
            "search_index_limit" => self.search_index_limit.to_string(),
            "request_timeout" => self.request_timeout.to_string(),
            _ => return Err(unknown_key(key)),
        };
        Ok(value)
    }

    /// Set a value by key. The config is validated before it is changed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();
        match key {
            "api_base_url" => updated.api_base_url = value.trim_end_matches('/').to_string(),
            "artwork_base_url" => {
                updated.artwork_base_url = value.trim_end_matches('/').to_string()
            }
            "page_size" => updated.page_size = parse_number(key, value)?,
            "search_index_limit" => updated.search_index_limit = parse_number(key, value)?,
            "request_timeout" => updated.request_timeout = parse_number(key, value)?,
            _ => return Err(unknown_key(key)),
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

fn validate_url(key: &str, value: &str) -> Result<()> {
    let url = Url::parse(value)
        .map_err(|e| PokedexError::Config(format!("invalid {key} '{value}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(PokedexError::Config(format!(
            "invalid {key} '{value}': expected an http or https URL"
        )));
    }
    Ok(())
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse::<T>().map_err(|_| {
        PokedexError::Config(format!(
            "invalid value '{value}' for {key}. Expected a non-negative integer"
        ))
    })
}

fn unknown_key(key: &str) -> PokedexError {
    PokedexError::Config(format!(
        "unknown config key '{key}'. Valid keys: {}",
        CONFIG_KEYS.join(", ")
    ))
}
