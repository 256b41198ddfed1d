//! Catalog filtering and page windows

use std::ops::Range;

use crate::state::EntitySummary;

/// Case-insensitive substring match over the catalog, keeping catalog order.
pub fn filter_catalog(catalog: &[EntitySummary], query: &str) -> Vec<EntitySummary> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    catalog
        .iter()
        .filter(|entry| entry.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Slice bounds for a page of `size` starting at `offset`, clamped to `len`.
///
/// Past-the-end offsets give an empty range rather than panicking.
pub fn page_window(len: usize, offset: usize, size: usize) -> Range<usize> {
    let start = offset.min(len);
    let end = start.saturating_add(size).min(len);
    start..end
}
