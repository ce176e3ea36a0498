//! PokeAPI REST client.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::error::{PokedexError, Result};

use super::{CatalogAccessor, CatalogPage, PokemonDetail};

const USER_AGENT: &str = concat!("pokedex/", env!("CARGO_PKG_VERSION"));

/// HTTP-backed catalog accessor
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    client: Client,
    base_url: Url,
}

impl PokeApiClient {
    /// Create a client from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(USER_AGENT)
            .build()?;
        Self::with_client(client, &config.api_base_url())
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            PokedexError::Config(format!("invalid API base URL '{base_url}': {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(PokedexError::Config(format!(
                "invalid API base URL '{base_url}': cannot be a base"
            )));
        }
        Ok(Self { client, base_url })
    }

    /// `{base}/pokemon?offset={offset}&limit={limit}`
    pub fn page_url(&self, offset: usize, limit: usize) -> Url {
        let mut url = self.endpoint(&["pokemon"]);
        url.query_pairs_mut()
            .append_pair("offset", &offset.to_string())
            .append_pair("limit", &limit.to_string());
        url
    }

    /// `{base}/pokemon/{name}`, with the name lower-cased and percent-encoded
    pub fn detail_url(&self, name: &str) -> Url {
        let name = name.trim().to_lowercase();
        self.endpoint(&["pokemon", name.as_str()])
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in with_client
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_body(&self, url: &Url, what: &str) -> Result<reqwest::Response> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(PokedexError::NotFound(what.to_string()));
        }
        if !status.is_success() {
            return Err(PokedexError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T> {
        let body = self.get_body(&url, what).await?.text().await?;
        decode(&body)
    }
}

/// Decode a JSON body; malformed bodies become `PokedexError::Decode`.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    Ok(serde_json::from_str(body)?)
}

impl CatalogAccessor for PokeApiClient {
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<CatalogPage> {
        let url = self.page_url(offset, limit);
        tracing::debug!(%url, "fetching catalog page");
        self.get_json(url, &format!("catalog page at offset {offset}"))
            .await
    }

    async fn fetch_detail(&self, name: &str) -> Result<PokemonDetail> {
        let url = self.detail_url(name);
        tracing::debug!(%url, "fetching pokemon detail");
        self.get_json(url, &format!("pokemon '{name}'")).await
    }

    async fn fetch_artwork(&self, url: &str) -> Result<Vec<u8>> {
        let url = Url::parse(url)
            .map_err(|e| PokedexError::Other(format!("invalid artwork URL '{url}': {e}")))?;
        tracing::debug!(%url, "fetching artwork");
        let bytes = self
            .get_body(&url, &format!("artwork at {url}"))
            .await?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }
}
