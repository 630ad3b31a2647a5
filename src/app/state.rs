// Vitrine - app/state.rs
//
// Application state management. Holds the loaded catalogues, the
// flattened item list, filter state, the selection, and the onboarding
// flag. Owned by the eframe::App implementation.
//
// All reads and writes happen on the UI-update thread.

use crate::core::filter::FilterState;
use crate::core::model::{
    Catalog, CatalogSummary, CategoryGroup, CollectionSummary, GalleryItem, Selection,
};
use crate::util::constants;

/// Which central view renders, and with what item.
///
/// This is the single observable output of the selection core: the
/// onboarding gate first, then exactly one of list or detail depending
/// on whether a selection is present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActiveView<'a> {
    /// First-run welcome flow; the gallery is not yet revealed.
    Onboarding,

    /// No selection: the grouped list renders.
    List,

    /// A selection exists: the detail view for that item renders.
    Detail(&'a GalleryItem),
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Loaded catalogues (built-ins first), in load order.
    pub catalogs: Vec<Catalog>,

    /// Flattened items from all catalogues, in catalogue order.
    pub items: Vec<GalleryItem>,

    /// Indices of items matching the current filter (into `items`).
    pub visible_indices: Vec<usize>,

    /// Current filter configuration.
    pub filter_state: FilterState,

    /// Raw regex text as typed in the sidebar; compiled into
    /// `filter_state` on change.
    pub regex_input: String,

    /// Compile error for `regex_input`, shown under the field.
    pub regex_error: Option<String>,

    /// Which entry, if any, is chosen. Drives list vs detail.
    pub selection: Selection,

    /// Whether the first-run welcome flow has been completed.
    pub onboarding_complete: bool,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal warnings (config, catalogue load, imports).
    pub warnings: Vec<String>,

    /// Whether to show the collection summary dialog.
    pub show_summary: bool,

    /// Whether to show the options dialog.
    pub show_options: bool,

    /// Whether to show the About dialog.
    pub show_about: bool,

    /// Runtime-adjustable UI font size in points (Options dialog).
    pub ui_font_size: f32,

    /// Runtime-adjustable cap on files collected per folder import.
    pub max_files_limit: usize,

    /// Runtime-adjustable recursion depth for folder imports.
    pub max_import_depth: usize,

    /// User catalogue directory, shown in the Options dialog and used by
    /// the import actions. None when platform dirs cannot be resolved.
    pub user_catalogs_dir: Option<std::path::PathBuf>,

    /// Set by the UI to ask the owner to re-load catalogues from disk.
    pub request_reload_catalogs: bool,

    /// Set by the UI to ask the owner to open the user catalogue folder
    /// in the system file manager.
    pub request_open_catalog_dir: bool,

    /// Set by the UI to ask the owner to reveal a catalogue file in the
    /// system file manager.
    pub request_reveal_source: Option<std::path::PathBuf>,

    /// Where the session snapshot is written. None disables persistence
    /// (platform dirs unavailable).
    pub session_file: Option<std::path::PathBuf>,

    /// Starting directory for the next folder import dialog.
    pub last_import_root: Option<std::path::PathBuf>,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    /// Create initial state from loaded catalogues.
    pub fn new(catalogs: Vec<Catalog>, debug_mode: bool) -> Self {
        let mut state = Self {
            catalogs,
            items: Vec::new(),
            visible_indices: Vec::new(),
            filter_state: FilterState::default(),
            regex_input: String::new(),
            regex_error: None,
            selection: Selection::None,
            onboarding_complete: false,
            status_message: String::new(),
            warnings: Vec::new(),
            show_summary: false,
            show_options: false,
            show_about: false,
            ui_font_size: constants::DEFAULT_FONT_SIZE,
            max_files_limit: constants::DEFAULT_MAX_FILES,
            max_import_depth: constants::DEFAULT_MAX_DEPTH,
            user_catalogs_dir: None,
            request_reload_catalogs: false,
            request_open_catalog_dir: false,
            request_reveal_source: None,
            session_file: None,
            last_import_root: None,
            debug_mode,
        };
        state.rebuild_items();
        state
    }

    /// Re-flatten the item list from the loaded catalogues and refresh
    /// the visible set.
    ///
    /// Called after catalogue reload or import. The selection is a
    /// snapshot by value, so it stays displayable even if its catalogue
    /// was replaced; the user leaves it via the back action as usual.
    pub fn rebuild_items(&mut self) {
        self.items = self
            .catalogs
            .iter()
            .flat_map(|c| c.items.iter().cloned())
            .collect();
        self.apply_filters();
        self.status_message = format!(
            "{} items from {} catalogue{}.",
            self.items.len(),
            self.catalogs.len(),
            if self.catalogs.len() == 1 { "" } else { "s" }
        );
        tracing::debug!(
            catalogs = self.catalogs.len(),
            items = self.items.len(),
            "Item list rebuilt"
        );
    }

    /// Recompute visible indices from current items and filter state.
    ///
    /// Deliberately leaves the selection alone: the detail view shows a
    /// chosen item whether or not the list still contains it.
    pub fn apply_filters(&mut self) {
        self.visible_indices = crate::core::filter::apply_filters(&self.items, &self.filter_state);
    }

    /// Item-click path: choose the item at `item_index` (an index into
    /// `items`) and switch to the detail view.
    ///
    /// A stale index (e.g. from a frame racing a reload) is ignored with
    /// a log line rather than panicking; selection is total.
    pub fn select(&mut self, item_index: usize) {
        match self.items.get(item_index) {
            Some(item) => {
                tracing::debug!(id = item.id, name = %item.name, "Item selected");
                self.selection.select(item.clone());
            }
            None => {
                tracing::warn!(item_index, len = self.items.len(), "Selection index out of range");
            }
        }
    }

    /// Back path: drop the selection and return to the list view.
    /// A no-op when nothing is selected.
    pub fn clear_selection(&mut self) {
        if self.selection.is_selected() {
            tracing::debug!("Selection cleared");
        } else {
            tracing::trace!("Back requested with no selection; ignoring");
        }
        self.selection.clear();
    }

    /// Complete the first-run welcome flow and reveal the gallery.
    pub fn complete_onboarding(&mut self) {
        self.onboarding_complete = true;
        tracing::info!("Onboarding completed");
    }

    /// The single observable output: which view is active, with what item.
    pub fn active_view(&self) -> ActiveView<'_> {
        if !self.onboarding_complete {
            return ActiveView::Onboarding;
        }
        match self.selection.selected() {
            Some(item) => ActiveView::Detail(item),
            None => ActiveView::List,
        }
    }

    /// The visible items grouped by category, in first-seen category order.
    pub fn grouped(&self) -> Vec<CategoryGroup> {
        crate::core::model::group_by_category(&self.items, &self.visible_indices)
    }

    /// The visible items flattened in grouped display order (export order).
    pub fn visible_in_display_order(&self) -> Vec<&GalleryItem> {
        self.grouped()
            .iter()
            .flat_map(|g| g.item_indices.iter())
            .filter_map(|&idx| self.items.get(idx))
            .collect()
    }

    /// Distinct categories across ALL items in first-seen order, for the
    /// filter checkboxes. Unaffected by the current filter.
    pub fn categories(&self) -> Vec<String> {
        let all: Vec<usize> = (0..self.items.len()).collect();
        crate::core::model::group_by_category(&self.items, &all)
            .into_iter()
            .map(|g| g.category)
            .collect()
    }

    /// Aggregate statistics for the summary dialog.
    pub fn collection_summary(&self) -> CollectionSummary {
        let all: Vec<usize> = (0..self.items.len()).collect();
        let items_by_category: Vec<(String, usize)> =
            crate::core::model::group_by_category(&self.items, &all)
                .into_iter()
                .map(|g| (g.category, g.item_indices.len()))
                .collect();

        CollectionSummary {
            total_items: self.items.len(),
            visible_items: self.visible_indices.len(),
            total_categories: items_by_category.len(),
            items_by_category,
            catalog_summaries: self
                .catalogs
                .iter()
                .map(|c| CatalogSummary {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    version: c.version.clone(),
                    item_count: c.items.len(),
                    builtin: c.builtin,
                })
                .collect(),
        }
    }

    /// Persist the current session if a session path is configured.
    ///
    /// Failures are logged and swallowed; losing a session snapshot is
    /// never worth interrupting the user.
    pub fn save_session(&self) {
        let Some(ref path) = self.session_file else {
            return;
        };
        let data = crate::app::session::SessionData {
            version: crate::app::session::SESSION_VERSION,
            onboarding_complete: self.onboarding_complete,
            filter: crate::app::session::PersistedFilter::capture(&self.filter_state),
            last_import_root: self.last_import_root.clone(),
            saved_at: chrono::Utc::now(),
        };
        if let Err(e) = crate::app::session::save(&data, path) {
            tracing::warn!(error = %e, "Failed to save session");
        }
    }

    /// Apply a previously saved session snapshot.
    pub fn restore_session(&mut self, data: crate::app::session::SessionData) {
        self.onboarding_complete = data.onboarding_complete;
        self.regex_input = data.filter.regex_pattern.clone();
        self.regex_error = None;
        self.filter_state = data.filter.restore();
        self.last_import_root = data.last_import_root;
        self.apply_filters();
        tracing::info!(
            onboarding_complete = self.onboarding_complete,
            "Session restored"
        );
    }

    /// Record a non-fatal warning, bounded so the list cannot grow
    /// without limit during a bad folder import.
    pub fn push_warning(&mut self, message: String) {
        if self.warnings.len() < constants::MAX_WARNINGS {
            tracing::warn!(warning = %message);
            self.warnings.push(message);
        } else if self.warnings.len() == constants::MAX_WARNINGS {
            tracing::warn!("Warning cap reached; further warnings suppressed");
            self.warnings
                .push(format!("(further warnings suppressed at {})", constants::MAX_WARNINGS));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

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

    fn make_catalog(id: &str, items: Vec<GalleryItem>) -> Catalog {
        let items = items
            .into_iter()
            .map(|mut i| {
                i.catalog_id = id.to_string();
                i
            })
            .collect();
        Catalog {
            id: id.to_string(),
            name: id.to_string(),
            version: "1.0".to_string(),
            description: String::new(),
            items,
            builtin: false,
            source: PathBuf::from(format!("<test>/{id}.toml")),
        }
    }

    fn ready_state() -> AppState {
        let catalog = make_catalog(
            "test",
            vec![
                make_item(1, "Nature", "Sunset"),
                make_item(4, "Cities", "New York"),
                make_item(5, "Cities", "Paris"),
            ],
        );
        let mut state = AppState::new(vec![catalog], false);
        state.complete_onboarding();
        state
    }

    #[test]
    fn test_new_flattens_catalogs_in_order() {
        let a = make_catalog("a", vec![make_item(1, "Nature", "Sunset")]);
        let b = make_catalog("b", vec![make_item(2, "Nature", "Forest")]);
        let state = AppState::new(vec![a, b], false);

        assert_eq!(state.items.len(), 2);
        assert_eq!(state.items[0].catalog_id, "a");
        assert_eq!(state.items[1].catalog_id, "b");
        assert_eq!(state.visible_indices, vec![0, 1]);
    }

    /// Until onboarding completes no selection call can reveal the gallery.
    #[test]
    fn test_onboarding_gates_the_view() {
        let catalog = make_catalog("test", vec![make_item(5, "Cities", "Paris")]);
        let mut state = AppState::new(vec![catalog], false);

        assert_eq!(state.active_view(), ActiveView::Onboarding);
        state.select(0);
        assert_eq!(state.active_view(), ActiveView::Onboarding);

        state.complete_onboarding();
        // The earlier select still holds; the machine was never reset.
        assert!(matches!(state.active_view(), ActiveView::Detail(_)));
    }

    /// List -> select(Paris) -> Detail("Paris") -> clear -> List.
    #[test]
    fn test_select_and_back_round_trip() {
        let mut state = ready_state();
        assert_eq!(state.active_view(), ActiveView::List);

        state.select(2); // Paris, id 5
        match state.active_view() {
            ActiveView::Detail(item) => {
                assert_eq!(item.id, 5);
                assert_eq!(item.name, "Paris");
            }
            other => panic!("expected Detail, got {other:?}"),
        }

        state.clear_selection();
        assert_eq!(state.active_view(), ActiveView::List);
    }

    #[test]
    fn test_back_on_list_is_noop() {
        let mut state = ready_state();
        state.clear_selection();
        state.clear_selection();
        assert_eq!(state.active_view(), ActiveView::List);
    }

    #[test]
    fn test_reselect_last_write_wins() {
        let mut state = ready_state();
        state.select(1); // New York
        state.select(2); // Paris
        match state.active_view() {
            ActiveView::Detail(item) => assert_eq!(item.name, "Paris"),
            other => panic!("expected Detail, got {other:?}"),
        }
    }

    #[test]
    fn test_select_out_of_range_ignored() {
        let mut state = ready_state();
        state.select(99);
        assert_eq!(state.active_view(), ActiveView::List);
    }

    /// Narrowing the filter must not kick the user out of the detail view.
    #[test]
    fn test_filtering_keeps_selection() {
        let mut state = ready_state();
        state.select(2); // Paris

        state.filter_state = FilterState::category_only("Nature");
        state.apply_filters();

        assert_eq!(state.visible_indices, vec![0]);
        match state.active_view() {
            ActiveView::Detail(item) => assert_eq!(item.name, "Paris"),
            other => panic!("selection should survive filtering, got {other:?}"),
        }
    }

    #[test]
    fn test_grouped_display_order() {
        let catalog = make_catalog(
            "test",
            vec![
                make_item(1, "Nature", "Sunset"),
                make_item(9, "Nature", "Dolphin"),
                make_item(4, "Cities", "New York"),
                make_item(9, "Animals", "Dolphin"),
            ],
        );
        let mut state = AppState::new(vec![catalog], false);
        state.complete_onboarding();

        let groups = state.grouped();
        let order: Vec<&str> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(order, vec!["Nature", "Cities", "Animals"]);

        let display: Vec<&str> = state
            .visible_in_display_order()
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(display, vec!["Sunset", "Dolphin", "New York", "Dolphin"]);
    }

    #[test]
    fn test_categories_ignore_active_filter() {
        let mut state = ready_state();
        state.filter_state = FilterState::category_only("Cities");
        state.apply_filters();

        assert_eq!(state.categories(), vec!["Nature", "Cities"]);
    }

    #[test]
    fn test_collection_summary_counts() {
        let mut state = ready_state();
        state.filter_state = FilterState::category_only("Cities");
        state.apply_filters();

        let summary = state.collection_summary();
        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.visible_items, 2);
        assert_eq!(summary.total_categories, 2);
        assert_eq!(summary.items_by_category[0], ("Nature".to_string(), 1));
        assert_eq!(summary.items_by_category[1], ("Cities".to_string(), 2));
        assert_eq!(summary.catalog_summaries.len(), 1);
        assert_eq!(summary.catalog_summaries[0].item_count, 3);
    }

    #[test]
    fn test_session_restore_applies_filter_and_flag() {
        let catalog = make_catalog(
            "test",
            vec![
                make_item(1, "Nature", "Sunset"),
                make_item(5, "Cities", "Paris"),
            ],
        );
        let mut state = AppState::new(vec![catalog], false);

        let mut saved = FilterState::category_only("Cities");
        saved.text_search = "par".to_string();
        let data = crate::app::session::SessionData {
            version: crate::app::session::SESSION_VERSION,
            onboarding_complete: true,
            filter: crate::app::session::PersistedFilter::capture(&saved),
            last_import_root: None,
            saved_at: chrono::Utc::now(),
        };

        state.restore_session(data);
        assert!(state.onboarding_complete);
        assert_eq!(state.visible_indices, vec![1]);
        // Restoring never touches the selection.
        assert_eq!(state.active_view(), ActiveView::List);
    }

    #[test]
    fn test_warning_cap() {
        let mut state = ready_state();
        for n in 0..constants::MAX_WARNINGS + 50 {
            state.push_warning(format!("warning {n}"));
        }
        assert_eq!(state.warnings.len(), constants::MAX_WARNINGS + 1);
        assert!(state.warnings.last().unwrap().contains("suppressed"));
    }
}
