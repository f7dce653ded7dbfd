//! Autocomplete suggestions for the search bar.

use crate::models::Doctor;

/// Maximum number of names offered at once.
pub const MAX_SUGGESTIONS: usize = 3;

/// Names of the first few records whose name contains `partial`, ignoring case.
///
/// Always runs against the full list, never the filtered view.
pub fn suggest(records: &[Doctor], partial: &str) -> Vec<String> {
    if partial.is_empty() {
        return Vec::new();
    }
    let needle = partial.to_lowercase();
    records
        .iter()
        .filter(|d| d.name_contains(&needle))
        .map(|d| d.name.clone())
        .take(MAX_SUGGESTIONS)
        .collect()
}
