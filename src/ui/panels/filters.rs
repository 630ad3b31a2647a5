// Vitrine - ui/panels/filters.rs
//
// Filter controls sidebar: category checkboxes, text search, and an
// optional regex with inline error reporting. All conditions combine
// with AND; changing a filter never touches the selection.

use crate::app::state::AppState;

/// Render the filter controls.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let any_active = !state.filter_state.is_empty() || !state.regex_input.is_empty();
    if ui
        .add_enabled(any_active, egui::Button::new("Clear Filters"))
        .clicked()
    {
        state.filter_state = crate::core::filter::FilterState::default();
        state.regex_input.clear();
        state.regex_error = None;
        state.apply_filters();
    }

    ui.separator();

    // Category checkboxes, in first-seen order across all items so the
    // list matches the gallery's section order.
    ui.label("Categories:");
    let categories = state.categories();
    let mut changed = false;
    for category in &categories {
        let mut checked = state.filter_state.categories.contains(category);
        if ui.checkbox(&mut checked, category).changed() {
            if checked {
                state.filter_state.categories.insert(category.clone());
            } else {
                state.filter_state.categories.remove(category);
            }
            changed = true;
        }
    }
    if changed {
        state.apply_filters();
    }

    ui.separator();

    // Text search over name, summary, description, and category.
    ui.label("Text search:");
    let text_response = ui.text_edit_singleline(&mut state.filter_state.text_search);
    if text_response.changed() {
        state.apply_filters();
    }

    ui.add_space(4.0);

    // Regex search; an invalid pattern keeps the previous one active and
    // shows the compile error inline.
    ui.label("Regex:");
    let regex_response = ui.text_edit_singleline(&mut state.regex_input);
    if regex_response.changed() {
        match state.filter_state.set_regex(&state.regex_input) {
            Ok(()) => {
                state.regex_error = None;
                state.apply_filters();
            }
            Err(e) => {
                state.regex_error = Some(e.to_string());
            }
        }
    }
    if let Some(ref err) = state.regex_error {
        ui.label(
            egui::RichText::new(err)
                .color(egui::Color32::from_rgb(248, 113, 113))
                .small(),
        );
    }
}
