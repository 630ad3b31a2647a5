// Vitrine - core/filter.rs
//
// Composable filter engine for gallery items.
// All active filters are AND-combined. Filters narrow the list view
// only; they never touch the selection.
// Pure logic; nothing here touches the filesystem or the UI.

use crate::core::model::GalleryItem;
use crate::util::constants;
use crate::util::error::FilterError;
use regex::Regex;
use std::collections::HashSet;

/// The whole filter set. Active fields are ANDed together.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Categories to include (empty = all).
    pub categories: HashSet<String>,

    /// Catalogues to include (empty = all).
    pub catalog_ids: HashSet<String>,

    /// Case-insensitive substring needle; empty means off.
    /// Matches against name, summary, description, and category.
    pub text_search: String,

    /// Compiled regex search over the same fields. None = no regex filter.
    pub regex_search: Option<Regex>,
}

impl FilterState {
    /// True when every filter is inactive.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.catalog_ids.is_empty()
            && self.text_search.is_empty()
            && self.regex_search.is_none()
    }

    /// Compile and store a new regex pattern.
    /// Returns an error if the pattern is too long or invalid; the
    /// previously active regex is untouched on failure.
    pub fn set_regex(&mut self, pattern: &str) -> Result<(), FilterError> {
        if pattern.is_empty() {
            self.regex_search = None;
            return Ok(());
        }
        if pattern.len() > constants::MAX_REGEX_PATTERN_LENGTH {
            return Err(FilterError::PatternTooLong {
                length: pattern.len(),
                max_length: constants::MAX_REGEX_PATTERN_LENGTH,
            });
        }
        let regex = Regex::new(pattern).map_err(|e| FilterError::InvalidRegex {
            pattern: pattern.to_string(),
            source: e,
        })?;
        self.regex_search = Some(regex);
        Ok(())
    }

    /// Create a quick-filter showing a single category.
    pub fn category_only(category: &str) -> Self {
        let mut categories = HashSet::new();
        categories.insert(category.to_string());
        Self {
            categories,
            ..Default::default()
        }
    }
}

/// Apply filters to a slice of items, returning indices of matching items.
///
/// Returns a Vec of indices into the original items slice. This avoids
/// copying items and keeps grouping cheap on the filtered view.
pub fn apply_filters(items: &[GalleryItem], filter: &FilterState) -> Vec<usize> {
    if filter.is_empty() {
        return (0..items.len()).collect();
    }

    let text_lower = filter.text_search.to_lowercase();

    items
        .iter()
        .enumerate()
        .filter(|(_, item)| matches_all(item, filter, &text_lower))
        .map(|(idx, _)| idx)
        .collect()
}

/// Check if a single item matches all active filters.
fn matches_all(item: &GalleryItem, filter: &FilterState, text_lower: &str) -> bool {
    // Category filter
    if !filter.categories.is_empty() && !filter.categories.contains(&item.category) {
        return false;
    }

    // Catalogue filter
    if !filter.catalog_ids.is_empty() && !filter.catalog_ids.contains(&item.catalog_id) {
        return false;
    }

    // Text search (case-insensitive substring over the display fields)
    if !text_lower.is_empty() {
        let hit = item.name.to_lowercase().contains(text_lower)
            || item.summary.to_lowercase().contains(text_lower)
            || item.description.to_lowercase().contains(text_lower)
            || item.category.to_lowercase().contains(text_lower);
        if !hit {
            return false;
        }
    }

    // Regex, when one compiled
    if let Some(ref regex) = filter.regex_search {
        let hit = regex.is_match(&item.name)
            || regex.is_match(&item.summary)
            || regex.is_match(&item.description)
            || regex.is_match(&item.category);
        if !hit {
            return false;
        }
    }

    true
}
