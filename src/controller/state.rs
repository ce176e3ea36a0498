//! State owned by the list controller and its transitions.
//!
//! Every mutation goes through one of the methods below so the pagination
//! invariants hold no matter which task drives the controller:
//! - `loaded_entries().len() <= total_count()`
//! - `end_reached()` once a batch came back short or the total was reached
//! - at most one page load between `begin_page_load` and its completion

use std::sync::Arc;

use super::search::filter_entries;
use crate::catalog::CatalogEntry;
use crate::error::PokedexError;

/// Result of one successful page fetch, already converted to entries.
#[derive(Debug, Clone)]
pub struct PageBatch {
    pub entries: Vec<CatalogEntry>,
    /// Number of items the server returned, including any that were skipped
    pub fetched: usize,
    pub total_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ListState {
    loaded: Vec<CatalogEntry>,
    search_results: Vec<CatalogEntry>,
    next_offset: usize,
    total_count: usize,
    end_reached: bool,
    is_loading: bool,
    is_searching: bool,
    last_error: Option<String>,
    query: String,
    index: Option<Arc<Vec<CatalogEntry>>>,
    index_loading: bool,
    index_error: Option<String>,
}

impl ListState {
    /// Entries accumulated by pagination, in catalog order
    pub fn loaded_entries(&self) -> &[CatalogEntry] {
        &self.loaded
    }

    /// What the grid shows: search results while searching, otherwise the
    /// paginated list
    pub fn visible_entries(&self) -> &[CatalogEntry] {
        if self.is_searching {
            &self.search_results
        } else {
            &self.loaded
        }
    }

    pub fn next_offset(&self) -> usize {
        self.next_offset
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn end_reached(&self) -> bool {
        self.end_reached
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_searching(&self) -> bool {
        self.is_searching
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn has_search_index(&self) -> bool {
        self.index.is_some()
    }

    pub fn index_error(&self) -> Option<&str> {
        self.index_error.as_deref()
    }

    /// Whether rendering the card at `visible_index` should trigger the next
    /// page: it sits in the last row of the two-column grid and nothing gates
    /// a load.
    pub fn should_load_more(&self, visible_index: usize) -> bool {
        let rows = self.visible_entries().len().div_ceil(2);
        let row = visible_index / 2;
        row + 1 >= rows && !self.end_reached && !self.is_loading && !self.is_searching
    }

    /// Claim the loading gate. Returns the offset to fetch, or `None` when a
    /// load is already running or the end was reached.
    pub fn begin_page_load(&mut self) -> Option<usize> {
        if self.is_loading || self.end_reached {
            return None;
        }
        self.is_loading = true;
        Some(self.next_offset)
    }

    pub fn complete_page_load(&mut self, batch: PageBatch, page_size: usize) {
        let remaining = batch.total_count.saturating_sub(self.loaded.len());
        let mut entries = batch.entries;
        entries.truncate(remaining);
        self.loaded.extend(entries);
        // a shrinking catalog keeps the entries already shown
        self.total_count = batch.total_count.max(self.loaded.len());

        self.next_offset += batch.fetched;
        self.end_reached = batch.fetched < page_size || self.next_offset >= self.total_count;
        self.is_loading = false;

        self.last_error = if self.total_count == 0 && self.loaded.is_empty() {
            Some(PokedexError::NotFound("the catalog has no entries".to_string()).to_string())
        } else {
            None
        };

        if self.is_searching && self.index.is_none() {
            self.refilter();
        }
    }

    /// Record a failed load. The offset is left alone so a retry asks for the
    /// same page.
    pub fn fail_page_load(&mut self, error: &PokedexError) {
        self.last_error = Some(error.to_string());
        self.is_loading = false;
    }

    /// Enter, update, or leave search mode.
    pub fn apply_search(&mut self, query: &str) {
        if query.trim().is_empty() {
            self.query.clear();
            self.is_searching = false;
            self.search_results.clear();
            return;
        }

        self.query = query.to_string();
        self.is_searching = true;
        self.refilter();
    }

    fn refilter(&mut self) {
        let source: &[CatalogEntry] = match &self.index {
            Some(index) => index.as_slice(),
            None => self.loaded.as_slice(),
        };
        self.search_results = filter_entries(source, &self.query);
    }

    /// Claim the index gate. Returns false when the index is loaded or loading.
    pub fn begin_index_load(&mut self) -> bool {
        if self.index_loading || self.index.is_some() {
            return false;
        }
        self.index_loading = true;
        true
    }

    pub fn complete_index_load(&mut self, entries: Vec<CatalogEntry>) {
        self.index = Some(Arc::new(entries));
        self.index_loading = false;
        self.index_error = None;
        if self.is_searching {
            self.refilter();
        }
    }

    pub fn fail_index_load(&mut self, error: &PokedexError) {
        self.index_error = Some(error.to_string());
        self.index_loading = false;
    }
}
