// Vitrine - ui/panels/detail.rs
//
// Item detail view: fills the central panel while a selection exists.
// The Back button (and Esc, handled by the top-level app) returns to
// the gallery by clearing the selection.

use crate::app::state::AppState;
use crate::ui::theme;

/// Render the detail view (central area).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    // Clone the selected item so the widgets below can mutate `state`
    // (the Back button clears the selection mid-frame).
    let Some(item) = state.selection.selected().cloned() else {
        ui.centered_and_justified(|ui| {
            ui.label("Nothing selected.");
        });
        return;
    };

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        if ui
            .button("\u{2190} Back")
            .on_hover_text("Return to the gallery (Esc)")
            .clicked()
        {
            state.clear_selection();
        }
        ui.label(
            egui::RichText::new(&item.category)
                .weak()
                .size(12.5),
        );
    });
    ui.separator();

    egui::ScrollArea::vertical()
        .id_salt("detail_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                ui.add_space(4.0);
                let (art_rect, _) = ui.allocate_exact_size(
                    egui::vec2(theme::DETAIL_ART_SIZE, theme::DETAIL_ART_SIZE),
                    egui::Sense::hover(),
                );
                theme::paint_art_tile(ui, art_rect, &item.art, &item.name);

                ui.add_space(14.0);
                ui.vertical(|ui| {
                    ui.add_space(6.0);
                    ui.label(egui::RichText::new(&item.name).size(26.0).strong());
                    if !item.summary.is_empty() {
                        ui.add_space(2.0);
                        ui.label(
                            egui::RichText::new(&item.summary)
                                .size(15.0)
                                .italics()
                                .weak(),
                        );
                    }

                    ui.add_space(12.0);
                    egui::Grid::new("detail_grid")
                        .num_columns(2)
                        .spacing([10.0, 4.0])
                        .show(ui, |ui| {
                            ui.label("Category:");
                            ui.label(&item.category);
                            ui.end_row();

                            ui.label("Item number:");
                            ui.label(item.id.to_string());
                            ui.end_row();

                            ui.label("Catalogue:");
                            let catalog_name = state
                                .catalogs
                                .iter()
                                .find(|c| c.id == item.catalog_id)
                                .map(|c| c.name.as_str())
                                .unwrap_or(item.catalog_id.as_str());
                            ui.label(catalog_name);
                            ui.end_row();
                        });
                });
            });

            if !item.description.is_empty() {
                ui.add_space(16.0);
                ui.separator();
                ui.add_space(8.0);
                ui.label(egui::RichText::new("About").strong());
                ui.add_space(4.0);
                ui.label(&item.description);
            }
        });
}
