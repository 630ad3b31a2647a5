// Vitrine - ui/panels/options.rs
//
// Options dialog: runtime-configurable application settings.
// Shown when the user opens View > Options... from the menu bar.
//
// Sections:
//   1. Appearance      — UI font size
//   2. Folder Import   — max files per import, max recursion depth
//   3. External Catalogues — catalogue folder, reload
//
// Import settings take effect on the *next* folder import. Appearance
// changes take effect immediately. All limits are validated against
// absolute bounds from util::constants.

use crate::app::state::AppState;
use crate::util::constants::{
    ABSOLUTE_MAX_DEPTH, ABSOLUTE_MAX_FILES, DEFAULT_FONT_SIZE, DEFAULT_MAX_DEPTH,
    DEFAULT_MAX_FILES, MAX_FONT_SIZE, MIN_FONT_SIZE, MIN_MAX_FILES,
};

/// Render the Options dialog (if `state.show_options` is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_options {
        return;
    }

    let mut open = true;
    egui::Window::new("Options")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(420.0)
        .show(ctx, |ui| {
            // =========================================================
            // Section 1 — Appearance
            // =========================================================
            ui.heading("Appearance");
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label("Font size:");
                let mut v = state.ui_font_size as f64;
                if ui
                    .add(
                        egui::Slider::new(
                            &mut v,
                            (MIN_FONT_SIZE as f64)..=(MAX_FONT_SIZE as f64),
                        )
                        .step_by(0.5)
                        .suffix(" pt"),
                    )
                    .changed()
                {
                    state.ui_font_size = (v as f32).clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
                }
                if (state.ui_font_size - DEFAULT_FONT_SIZE).abs() > 0.1
                    && ui
                        .small_button("Reset")
                        .on_hover_text("Reset to the built-in default")
                        .clicked()
                {
                    state.ui_font_size = DEFAULT_FONT_SIZE;
                }
            });
            ui.add_space(4.0);
            ui.label(
                egui::RichText::new(
                    "Scales all text in the application. Takes effect immediately.",
                )
                .small()
                .weak(),
            );

            ui.add_space(10.0);
            ui.separator();
            ui.add_space(6.0);

            // =========================================================
            // Section 2 — Folder Import
            // =========================================================
            ui.heading("Folder Import");
            ui.add_space(2.0);
            ui.label(
                egui::RichText::new(
                    "Controls how far File > Import Folder walks a directory tree when \
                     collecting catalogue packs. Changes take effect on the next import.",
                )
                .small()
                .weak(),
            );
            ui.add_space(8.0);

            // Max files per import.
            ui.horizontal(|ui| {
                ui.label("Max files per import:");
                let mut v = state.max_files_limit as f64;
                if ui
                    .add(
                        egui::Slider::new(
                            &mut v,
                            (MIN_MAX_FILES as f64)..=(ABSOLUTE_MAX_FILES as f64),
                        )
                        .integer()
                        .suffix(" files")
                        .logarithmic(true),
                    )
                    .changed()
                {
                    state.max_files_limit =
                        (v as usize).clamp(MIN_MAX_FILES, ABSOLUTE_MAX_FILES);
                }
            });
            ui.add_space(2.0);
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(format!(
                        "Default: {DEFAULT_MAX_FILES}  |  Max: {ABSOLUTE_MAX_FILES}"
                    ))
                    .small()
                    .weak(),
                );
                if state.max_files_limit != DEFAULT_MAX_FILES
                    && ui
                        .small_button("Reset")
                        .on_hover_text("Reset to the built-in default")
                        .clicked()
                {
                    state.max_files_limit = DEFAULT_MAX_FILES;
                }
            });

            ui.add_space(8.0);

            // Max recursion depth.
            ui.horizontal(|ui| {
                ui.label("Max folder depth:");
                let mut v = state.max_import_depth as f64;
                if ui
                    .add(
                        egui::Slider::new(&mut v, 1.0..=(ABSOLUTE_MAX_DEPTH as f64))
                            .integer()
                            .suffix(" levels"),
                    )
                    .changed()
                {
                    state.max_import_depth = (v as usize).clamp(1, ABSOLUTE_MAX_DEPTH);
                }
            });
            ui.add_space(2.0);
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(format!(
                        "Default: {DEFAULT_MAX_DEPTH}  |  Max: {ABSOLUTE_MAX_DEPTH}"
                    ))
                    .small()
                    .weak(),
                );
                if state.max_import_depth != DEFAULT_MAX_DEPTH
                    && ui
                        .small_button("Reset")
                        .on_hover_text("Reset to the built-in default")
                        .clicked()
                {
                    state.max_import_depth = DEFAULT_MAX_DEPTH;
                }
            });

            ui.add_space(10.0);
            ui.separator();
            ui.add_space(6.0);

            // =========================================================
            // Section 3 — External Catalogues
            // =========================================================
            ui.heading("External Catalogues");
            ui.add_space(2.0);
            ui.label(
                egui::RichText::new(
                    "Place custom .toml catalogue packs here to add your own \
                     collections. A pack with the same ID as a built-in \
                     catalogue replaces it.",
                )
                .small()
                .weak(),
            );
            ui.add_space(8.0);

            // Catalogue directory path.
            ui.horizontal(|ui| {
                ui.label("Catalogue folder:");
                if let Some(ref dir) = state.user_catalogs_dir {
                    ui.monospace(dir.display().to_string()).on_hover_text(
                        "Vitrine scans this directory for .toml packs on startup and on Reload",
                    );
                } else {
                    ui.label(egui::RichText::new("(not configured)").weak());
                }
            });
            ui.add_space(4.0);

            // Loaded catalogue counts.
            let total = state.catalogs.len();
            let builtin_count = state.catalogs.iter().filter(|c| c.builtin).count();
            let external_count = total.saturating_sub(builtin_count);
            ui.label(
                egui::RichText::new(format!(
                    "{total} catalogues loaded  \u{2014}  {builtin_count} built-in,  {external_count} external"
                ))
                .small()
                .weak(),
            );
            ui.add_space(8.0);

            // Action buttons.
            ui.horizontal(|ui| {
                let has_dir = state.user_catalogs_dir.is_some();
                if ui
                    .add_enabled(has_dir, egui::Button::new("Open Folder"))
                    .on_hover_text("Open the catalogue folder in your file manager")
                    .clicked()
                {
                    state.request_open_catalog_dir = true;
                }
                ui.add_space(4.0);
                if ui
                    .button("Reload Catalogues")
                    .on_hover_text(
                        "Re-scan the catalogue folder and merge any new or updated \
                         packs with the built-in set. Takes effect immediately.",
                    )
                    .clicked()
                {
                    state.request_reload_catalogs = true;
                }
            });

            ui.add_space(10.0);
            ui.separator();
            ui.add_space(6.0);

            // =========================================================
            // Footer
            // =========================================================
            ui.label(
                egui::RichText::new(
                    "Import settings apply to the next folder import. \
                     Catalogue changes take effect immediately.",
                )
                .small()
                .italics()
                .weak(),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Close").clicked() {
                    state.show_options = false;
                }
            });
        });

    if !open {
        state.show_options = false;
    }
}
