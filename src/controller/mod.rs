//! Paginated list loading with interleaved search.
//!
//! [`ListController`] owns a [`ListState`] inside a `tokio::sync::watch`
//! channel. Every transition notifies subscribers, and the check-and-set of
//! the loading gate happens inside a single `send_if_modified` call so two
//! callers racing on `load_next_page` cannot both start a fetch.

pub mod search;
pub mod state;

use std::sync::Arc;

use pokedex_palette::Rgb;
use tokio::sync::watch;

use crate::catalog::{CatalogAccessor, CatalogPage, entries_from_items};
use crate::color;
use crate::config::{Config, DEFAULT_ARTWORK_BASE_URL, DEFAULT_PAGE_SIZE};

pub use search::filter_entries;
pub use state::{ListState, PageBatch};

/// Tunables for a [`ListController`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    pub page_size: usize,
    pub search_index_limit: usize,
    pub artwork_base_url: String,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_index_limit: 100_000,
            artwork_base_url: DEFAULT_ARTWORK_BASE_URL.to_string(),
        }
    }
}

impl ListOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            page_size: config.page_size,
            search_index_limit: config.search_index_limit,
            artwork_base_url: config.artwork_base_url(),
        }
    }
}

pub struct ListController<A> {
    accessor: Arc<A>,
    state: watch::Sender<ListState>,
    options: ListOptions,
}

impl<A: CatalogAccessor> ListController<A> {
    pub fn new(accessor: Arc<A>, options: ListOptions) -> Self {
        Self {
            accessor,
            state: watch::Sender::new(ListState::default()),
            options,
        }
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    pub fn accessor(&self) -> &Arc<A> {
        &self.accessor
    }

    /// Observe state changes. The receiver sees the current state immediately.
    pub fn subscribe(&self) -> watch::Receiver<ListState> {
        self.state.subscribe()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> ListState {
        self.state.borrow().clone()
    }

    /// Read the current state without cloning it
    pub fn with_state<R>(&self, f: impl FnOnce(&ListState) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Fetch the next page and append it.
    ///
    /// Does nothing while another page load is in flight or after the end of
    /// the catalog was reached. Failures are recorded in `last_error` and
    /// leave the offset untouched, so calling this again retries the page.
    pub async fn load_next_page(&self) {
        let mut claimed = None;
        self.state.send_if_modified(|state| {
            claimed = state.begin_page_load();
            claimed.is_some()
        });
        let Some(offset) = claimed else {
            tracing::debug!("page load skipped: already loading or at end");
            return;
        };

        let limit = self.options.page_size;
        tracing::debug!(offset, limit, "loading catalog page");

        match self.accessor.fetch_page(offset, limit).await {
            Ok(page) => {
                let batch = self.to_batch(page);
                tracing::debug!(
                    offset,
                    fetched = batch.fetched,
                    total = batch.total_count,
                    "catalog page loaded"
                );
                self.state
                    .send_modify(|state| state.complete_page_load(batch, limit));
            }
            Err(e) => {
                tracing::warn!(
                    retryable = e.is_retryable(),
                    "Failed to load catalog page at offset {offset}: {e}"
                );
                self.state.send_modify(|state| state.fail_page_load(&e));
            }
        }
    }

    /// Fetch the full catalog once for search.
    ///
    /// Independent of the pagination gate; may run while a page load is in
    /// flight. Does nothing if the index is already loaded or loading.
    pub async fn load_search_index(&self) {
        if !self.state.send_if_modified(|state| state.begin_index_load()) {
            return;
        }

        let limit = self.options.search_index_limit;
        tracing::debug!(limit, "loading search index");

        match self.accessor.fetch_page(0, limit).await {
            Ok(page) => {
                let entries = entries_from_items(&page.results, &self.options.artwork_base_url);
                tracing::debug!(entries = entries.len(), "search index loaded");
                self.state
                    .send_modify(|state| state.complete_index_load(entries));
            }
            Err(e) => {
                tracing::warn!(retryable = e.is_retryable(), "Failed to load search index: {e}");
                self.state.send_modify(|state| state.fail_index_load(&e));
            }
        }
    }

    /// Filter the catalog by `query`; a blank query leaves search mode and
    /// restores the paginated list. Never touches the network.
    pub fn search(&self, query: &str) {
        self.state.send_modify(|state| state.apply_search(query));
    }

    /// See [`ListState::should_load_more`]
    pub fn should_load_more(&self, visible_index: usize) -> bool {
        self.state.borrow().should_load_more(visible_index)
    }

    /// Compute the dominant color of decoded artwork bytes and hand it to
    /// `callback` exactly once. On decode failure the callback is never
    /// invoked and the caller keeps its default color.
    pub async fn resolve_artwork_color<F>(&self, image: Vec<u8>, callback: F)
    where
        F: FnOnce(Rgb),
    {
        color::resolve_artwork_color(image, callback).await;
    }

    fn to_batch(&self, page: CatalogPage) -> PageBatch {
        PageBatch {
            entries: entries_from_items(&page.results, &self.options.artwork_base_url),
            fetched: page.results.len(),
            total_count: page.count,
        }
    }
}
