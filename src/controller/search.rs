//! Client-side catalog search.
//!
//! An entry matches when its name contains the trimmed query ignoring case,
//! or when the query is a number equal to the entry's catalog number.

use crate::catalog::CatalogEntry;

/// Filter `entries` by `query`, preserving catalog order.
///
/// A blank query matches everything.
pub fn filter_entries(entries: &[CatalogEntry], query: &str) -> Vec<CatalogEntry> {
    let query = query.trim();
    if query.is_empty() {
        return entries.to_vec();
    }

    let needle = query.to_lowercase();
    let number = query.parse::<u32>().ok();

    entries
        .iter()
        .filter(|entry| {
            number == Some(entry.number) || entry.name.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
