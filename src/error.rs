use pokedex_palette::PaletteError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PokedexError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid detail URL '{0}': no numeric id in path")]
    InvalidDetailUrl(String),

    #[error("image error: {0}")]
    Image(#[from] PaletteError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("{0}")]
    Other(String),
}

impl PokedexError {
    /// True for failures that may succeed when the same request is retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            PokedexError::Network(_) => true,
            PokedexError::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, PokedexError>;
