// Vitrine - ui/panels/catalogs.rs
//
// Catalogue sidebar section: lists every loaded catalogue with a
// visibility checkbox, plus reload and folder actions.
//
// Checkbox semantics mirror the category filter: checked catalogues form
// a whitelist, and an empty set means no catalogue filter is active.
// Folder actions are forwarded to the top-level app via request flags so
// this layer never touches the filesystem itself.

use crate::app::state::AppState;

/// Render the catalogue list and actions.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Catalogues");
    ui.separator();

    if state.catalogs.is_empty() {
        ui.label(egui::RichText::new("No catalogues loaded.").weak());
        return;
    }

    let mut changed = false;
    let mut reveal: Option<std::path::PathBuf> = None;

    for catalog in &state.catalogs {
        let mut checked = state.filter_state.catalog_ids.contains(&catalog.id);
        let label = format!("{} ({})", catalog.name, catalog.items.len());

        ui.horizontal(|ui| {
            let response = ui.checkbox(&mut checked, label).on_hover_ui(|ui| {
                if !catalog.description.is_empty() {
                    ui.label(&catalog.description);
                }
                ui.label(
                    egui::RichText::new(format!("v{}", catalog.version))
                        .small()
                        .weak(),
                );
                if catalog.builtin {
                    ui.label(egui::RichText::new("Built-in").small().weak());
                } else {
                    ui.label(
                        egui::RichText::new(catalog.source.display().to_string())
                            .monospace()
                            .small(),
                    );
                }
            });

            if response.changed() {
                if checked {
                    state.filter_state.catalog_ids.insert(catalog.id.clone());
                } else {
                    state.filter_state.catalog_ids.remove(&catalog.id);
                }
                changed = true;
            }

            // Built-ins are embedded in the binary; only user packs have
            // a file worth revealing.
            if !catalog.builtin
                && ui
                    .small_button("\u{1f4c1}")
                    .on_hover_text("Show this catalogue file in your file manager")
                    .clicked()
            {
                reveal = Some(catalog.source.clone());
            }
        });
    }

    if changed {
        state.apply_filters();
    }
    if reveal.is_some() {
        state.request_reveal_source = reveal;
    }

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        if ui
            .button("Reload")
            .on_hover_text("Re-read all catalogue packs from disk")
            .clicked()
        {
            state.request_reload_catalogs = true;
        }
        let has_dir = state.user_catalogs_dir.is_some();
        if ui
            .add_enabled(has_dir, egui::Button::new("Open Folder"))
            .on_hover_text("Open the user catalogue folder in your file manager")
            .clicked()
        {
            state.request_open_catalog_dir = true;
        }
    });
}
