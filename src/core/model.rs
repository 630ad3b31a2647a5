// Vitrine - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies (Core depends on std only).
//
// These types are the shared vocabulary across all layers.

use serde::Serialize;
use std::collections::HashMap;

// =============================================================================
// Gallery Item (normalised output of catalogue loading)
// =============================================================================

/// A single browsable gallery entry, normalised across all catalogues.
///
/// This is the core data unit that flows through grouping, filtering,
/// display, and export. Every catalogue produces these regardless of
/// where its TOML came from. Instances are immutable after construction
/// and never persisted.
///
/// Item ids are NOT unique: the same id may appear under several
/// categories (or even twice in one catalogue) and each occurrence is a
/// distinct entry. Nothing in Vitrine may key items by id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryItem {
    /// Numeric identifier from the catalogue. Display-only, not a key.
    pub id: u32,

    /// Category the item is grouped under (e.g. "Nature").
    pub category: String,

    /// Stable art key naming the item's visual (drives tile colour/glyph).
    pub art: String,

    /// Short display name (e.g. "Paris").
    pub name: String,

    /// One-line summary shown on cards and at the top of the detail view.
    pub summary: String,

    /// Longer description shown only in the detail view.
    pub description: String,

    /// ID of the catalogue that supplied this item.
    pub catalog_id: String,
}

// =============================================================================
// Selection
// =============================================================================

/// Which gallery entry, if any, is currently chosen.
///
/// A two-state machine: `None` (the list view is active) or
/// `Selected(item)` (the detail view for that item is active). `None` is
/// the initial state, both states are reachable from each other, and
/// there is no terminal state. Both transitions are total: no operation
/// on a `Selection` can fail.
///
/// The selected item is stored by value so the detail view stays stable
/// even when filtering removes the item from the visible list.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selection {
    /// No entry chosen; the list view renders.
    #[default]
    None,

    /// One entry chosen; the detail view for it renders.
    Selected(GalleryItem),
}

impl Selection {
    /// Transition to `Selected(item)`.
    ///
    /// Selecting while already selected replaces the previous choice
    /// outright (last write wins, no queuing).
    pub fn select(&mut self, item: GalleryItem) {
        *self = Selection::Selected(item);
    }

    /// Transition back to `None`.
    ///
    /// Clearing when nothing is selected is a no-op.
    pub fn clear(&mut self) {
        *self = Selection::None;
    }

    /// The chosen item, if any.
    pub fn selected(&self) -> Option<&GalleryItem> {
        match self {
            Selection::None => None,
            Selection::Selected(item) => Some(item),
        }
    }

    /// True when an entry is chosen.
    pub fn is_selected(&self) -> bool {
        matches!(self, Selection::Selected(_))
    }
}

// =============================================================================
// Catalogue (runtime representation)
// =============================================================================

/// Runtime representation of a catalogue after TOML parsing and
/// validation. Built from `CatalogDefinition` (the raw TOML structure).
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Unique catalogue identifier (e.g. "sample-gallery").
    pub id: String,

    /// Human-readable name (e.g. "Sample Gallery").
    pub name: String,

    /// Catalogue schema version.
    pub version: String,

    /// Description of what this catalogue contains.
    pub description: String,

    /// The items the catalogue contributes, in declaration order.
    /// Each item carries this catalogue's id in its `catalog_id` field.
    pub items: Vec<GalleryItem>,

    /// Whether this is a built-in catalogue (true) or user-supplied (false).
    pub builtin: bool,

    /// Where the catalogue came from. Built-ins use a `<builtin>/` pseudo
    /// path; user catalogues the real file path.
    pub source: std::path::PathBuf,
}

// =============================================================================
// Category grouping
// =============================================================================

/// One contiguous run of items sharing a category, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    /// The shared category key.
    pub category: String,

    /// Indices into the full item slice, in catalogue order.
    pub item_indices: Vec<usize>,
}

/// Groups the visible items by category for presentation.
///
/// Groups appear in first-seen category order and each group's items keep
/// their relative order, so the grouped view is a stable reordering of
/// the input. Items sharing an id are deliberately kept as distinct
/// entries; grouping never deduplicates.
///
/// `visible` holds indices into `items` (the output of filtering).
/// Indices out of range are skipped rather than panicking.
pub fn group_by_category(items: &[GalleryItem], visible: &[usize]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    let mut position: HashMap<&str, usize> = HashMap::new();

    for &idx in visible {
        let Some(item) = items.get(idx) else {
            continue;
        };
        match position.get(item.category.as_str()) {
            Some(&at) => groups[at].item_indices.push(idx),
            None => {
                position.insert(item.category.as_str(), groups.len());
                groups.push(CategoryGroup {
                    category: item.category.clone(),
                    item_indices: vec![idx],
                });
            }
        }
    }

    groups
}

// =============================================================================
// Candidate File (output of folder import discovery)
// =============================================================================

/// Metadata about a file found during a folder import, before validation.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    /// Full path to the file.
    pub path: std::path::PathBuf,

    /// File size in bytes.
    pub size: u64,

    /// Last modification timestamp.
    pub modified: Option<chrono::DateTime<chrono::Utc>>,
}

// =============================================================================
// Collection Summary
// =============================================================================

/// Summary statistics for the loaded collection.
#[derive(Debug, Clone, Default)]
pub struct CollectionSummary {
    /// Total items across all loaded catalogues.
    pub total_items: usize,

    /// Items currently visible after filtering.
    pub visible_items: usize,

    /// Number of distinct categories (across all catalogues).
    pub total_categories: usize,

    /// Items per category, in first-seen category order.
    pub items_by_category: Vec<(String, usize)>,

    /// Per-catalogue breakdown.
    pub catalog_summaries: Vec<CatalogSummary>,
}

/// Per-catalogue statistics.
#[derive(Debug, Clone)]
pub struct CatalogSummary {
    /// Catalogue identifier.
    pub id: String,

    /// Human-readable catalogue name.
    pub name: String,

    /// Catalogue schema version.
    pub version: String,

    /// Number of items the catalogue contributed.
    pub item_count: usize,

    /// Whether the catalogue is built-in (true) or user-supplied (false).
    pub builtin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item(id: u32, category: &str, name: &str) -> GalleryItem {
        GalleryItem {
            id,
            category: category.to_string(),
            art: name.to_lowercase(),
            name: name.to_string(),
            summary: format!("{name} summary"),
            description: format!("A detailed description of {name}."),
            catalog_id: "test".to_string(),
        }
    }

    /// Initial state is no selection; the list view is active.
    #[test]
    fn selection_starts_empty() {
        let sel = Selection::default();
        assert!(!sel.is_selected());
        assert!(sel.selected().is_none());
    }

    /// After select the chosen item is observable; after clear it is gone.
    #[test]
    fn select_then_clear_round_trip() {
        let mut sel = Selection::default();
        sel.select(make_item(5, "Cities", "Paris"));
        assert_eq!(sel.selected().map(|i| i.name.as_str()), Some("Paris"));
        sel.clear();
        assert!(sel.selected().is_none());
    }

    /// Clearing an already-empty selection is a no-op, not an error.
    #[test]
    fn clear_when_empty_is_noop() {
        let mut sel = Selection::default();
        sel.clear();
        assert_eq!(sel, Selection::None);
        sel.clear();
        assert_eq!(sel, Selection::None);
    }

    /// Back-to-back selects keep only the most recent item.
    #[test]
    fn select_select_last_write_wins() {
        let mut sel = Selection::default();
        sel.select(make_item(4, "Cities", "New York"));
        sel.select(make_item(5, "Cities", "Paris"));
        assert_eq!(sel.selected().map(|i| i.id), Some(5));
        assert_eq!(sel.selected().map(|i| i.name.as_str()), Some("Paris"));
    }

    /// For any select/clear sequence the observable state tracks the most
    /// recent select not yet followed by a clear.
    #[test]
    fn selection_tracks_most_recent_select() {
        let mut sel = Selection::default();
        sel.select(make_item(1, "Nature", "Sunset"));
        sel.clear();
        sel.select(make_item(2, "Nature", "Forest"));
        sel.select(make_item(3, "Nature", "Mountain"));
        assert_eq!(sel.selected().map(|i| i.id), Some(3));
        sel.clear();
        sel.clear();
        assert!(!sel.is_selected());
    }

    /// Groups come out contiguous and in first-seen category order.
    #[test]
    fn grouping_preserves_first_seen_order() {
        let items = vec![
            make_item(1, "Nature", "Sunset"),
            make_item(4, "Cities", "New York"),
            make_item(2, "Nature", "Forest"),
            make_item(7, "Animals", "Lion"),
            make_item(5, "Cities", "Paris"),
        ];
        let visible: Vec<usize> = (0..items.len()).collect();
        let groups = group_by_category(&items, &visible);

        let order: Vec<&str> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(order, vec!["Nature", "Cities", "Animals"]);
        assert_eq!(groups[0].item_indices, vec![0, 2]);
        assert_eq!(groups[1].item_indices, vec![1, 4]);
        assert_eq!(groups[2].item_indices, vec![3]);
    }

    /// Duplicate ids in different categories stay distinct entries.
    #[test]
    fn grouping_keeps_duplicate_ids() {
        let items = vec![
            make_item(9, "Nature", "Dolphin"),
            make_item(7, "Animals", "Lion"),
            make_item(9, "Animals", "Dolphin"),
        ];
        let visible: Vec<usize> = (0..items.len()).collect();
        let groups = group_by_category(&items, &visible);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "Nature");
        assert_eq!(groups[0].item_indices, vec![0]);
        assert_eq!(groups[1].category, "Animals");
        assert_eq!(groups[1].item_indices, vec![1, 2]);

        let total: usize = groups.iter().map(|g| g.item_indices.len()).sum();
        assert_eq!(total, 3, "duplicates must not be collapsed");
    }

    /// Grouping a filtered subset only touches the visible indices.
    #[test]
    fn grouping_respects_visibility() {
        let items = vec![
            make_item(1, "Nature", "Sunset"),
            make_item(4, "Cities", "New York"),
            make_item(2, "Nature", "Forest"),
        ];
        let groups = group_by_category(&items, &[0, 2]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].category, "Nature");
        assert_eq!(groups[0].item_indices, vec![0, 2]);
    }

    /// Out-of-range visible indices are skipped, never a panic.
    #[test]
    fn grouping_skips_stale_indices() {
        let items = vec![make_item(1, "Nature", "Sunset")];
        let groups = group_by_category(&items, &[0, 99]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].item_indices, vec![0]);
    }

    #[test]
    fn grouping_empty_inputs() {
        assert!(group_by_category(&[], &[]).is_empty());
        let items = vec![make_item(1, "Nature", "Sunset")];
        assert!(group_by_category(&items, &[]).is_empty());
    }
}
