// Vitrine - ui/panels/summary.rs
//
// Collection summary modal window.
// Shows overall statistics, a per-category breakdown, and a
// per-catalogue table. Warnings from loading and imports are also listed.

use crate::app::state::AppState;

/// Render the collection summary dialog (if state.show_summary is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_summary {
        return;
    }

    let summary = state.collection_summary();

    let mut open = true;
    egui::Window::new("Collection Summary")
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .min_width(480.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            // -----------------------------------------------------------------
            // Overall statistics
            // -----------------------------------------------------------------
            ui.strong("Overview");
            egui::Grid::new("summary_overview")
                .num_columns(2)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    ui.label("Catalogues loaded:");
                    ui.label(summary.catalog_summaries.len().to_string());
                    ui.end_row();

                    ui.label("Total items:");
                    ui.label(summary.total_items.to_string());
                    ui.end_row();

                    ui.label("Visible items:");
                    ui.label(summary.visible_items.to_string());
                    ui.end_row();

                    ui.label("Categories:");
                    ui.label(summary.total_categories.to_string());
                    ui.end_row();
                });

            // -----------------------------------------------------------------
            // Per-category breakdown
            // -----------------------------------------------------------------
            if !summary.items_by_category.is_empty() {
                ui.add_space(8.0);
                ui.separator();
                ui.strong("Per-category breakdown");

                egui::ScrollArea::vertical()
                    .id_salt("summary_categories")
                    .max_height(160.0)
                    .show(ui, |ui| {
                        egui::Grid::new("summary_category_table")
                            .num_columns(2)
                            .striped(true)
                            .spacing([12.0, 3.0])
                            .show(ui, |ui| {
                                ui.strong("Category");
                                ui.strong("Items");
                                ui.end_row();

                                for (category, count) in &summary.items_by_category {
                                    ui.label(category);
                                    ui.label(count.to_string());
                                    ui.end_row();
                                }
                            });
                    });
            }

            // -----------------------------------------------------------------
            // Per-catalogue table
            // -----------------------------------------------------------------
            if !summary.catalog_summaries.is_empty() {
                ui.add_space(8.0);
                ui.separator();
                ui.strong("Catalogues");

                egui::ScrollArea::vertical()
                    .id_salt("summary_catalogs")
                    .max_height(160.0)
                    .show(ui, |ui| {
                        egui::Grid::new("summary_catalog_table")
                            .num_columns(4)
                            .striped(true)
                            .spacing([12.0, 3.0])
                            .show(ui, |ui| {
                                ui.strong("Name");
                                ui.strong("Version");
                                ui.strong("Items");
                                ui.strong("Origin");
                                ui.end_row();

                                for cs in &summary.catalog_summaries {
                                    ui.label(&cs.name);
                                    ui.label(
                                        egui::RichText::new(&cs.version).monospace().size(11.5),
                                    );
                                    ui.label(cs.item_count.to_string());
                                    ui.label(if cs.builtin { "built-in" } else { "user" });
                                    ui.end_row();
                                }
                            });
                    });
            }

            // -----------------------------------------------------------------
            // Warnings
            // -----------------------------------------------------------------
            if !state.warnings.is_empty() {
                ui.add_space(8.0);
                ui.separator();
                ui.strong(format!("Warnings ({})", state.warnings.len()));

                egui::ScrollArea::vertical()
                    .id_salt("summary_warnings")
                    .max_height(120.0)
                    .show(ui, |ui| {
                        for warn in &state.warnings {
                            ui.label(
                                egui::RichText::new(warn)
                                    .color(egui::Color32::from_rgb(253, 186, 116))
                                    .size(11.5),
                            );
                        }
                    });
            }

            ui.add_space(8.0);
            ui.separator();
            if ui.button("Close").clicked() {
                state.show_summary = false;
            }
        });

    if !open {
        state.show_summary = false;
    }
}
