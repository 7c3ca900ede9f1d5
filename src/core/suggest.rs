//! Type-ahead matching over the catalog.

/// Number of suggestions shown under the search box unless configured otherwise.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Returns the first `limit` catalog titles that contain `query`,
/// ignoring case, in catalog order.
///
/// An empty query matches nothing: the dropdown only opens once the user
/// has typed something.
pub fn suggestions_for(catalog: &[String], query: &str, limit: usize) -> Vec<String> {
    if query.is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|title| title.to_lowercase().contains(&needle))
        .take(limit)
        .cloned()
        .collect()
}
