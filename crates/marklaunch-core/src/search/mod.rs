//! Substring matching over bookmark items.

use crate::config::BookmarkItem;
use tracing::debug;

/// Trim and lower-case a raw query the way every comparison expects it.
#[must_use]
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Items whose key or label contains `query`, sorted ascending by key.
///
/// Returns references into `items` to avoid cloning on every keystroke.
#[must_use]
pub fn filter<'a>(query: &str, items: &'a [BookmarkItem]) -> Vec<&'a BookmarkItem> {
    filter_indices(query, items)
        .into_iter()
        .map(|idx| &items[idx])
        .collect()
}

/// Same as [`filter`], as positions into `items`.
#[must_use]
pub fn filter_indices(query: &str, items: &[BookmarkItem]) -> Vec<usize> {
    let needle = normalize_query(query);

    let mut matched: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| matches(&needle, item))
        .map(|(idx, _)| idx)
        .collect();

    // Input order is not trusted; stable sort keeps equal keys in input order.
    matched.sort_by(|&a, &b| items[a].key.cmp(&items[b].key));

    debug!(
        "Filter '{}' matched {} of {} items",
        needle,
        matched.len(),
        items.len()
    );
    matched
}

/// `needle` must already be normalized.
fn matches(needle: &str, item: &BookmarkItem) -> bool {
    needle.is_empty()
        || item.key.to_lowercase().contains(needle)
        || item.label.to_lowercase().contains(needle)
}
