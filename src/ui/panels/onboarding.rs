// Vitrine - ui/panels/onboarding.rs
//
// First-run welcome view. Occupies the central panel until the user
// continues to the gallery; dismissal is remembered in the session.

use crate::app::state::AppState;
use crate::util::constants;

/// Render the welcome view (central area).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.22);

        ui.label(
            egui::RichText::new(format!("Welcome to {}", constants::APP_NAME))
                .size(30.0)
                .strong(),
        );
        ui.add_space(10.0);

        ui.label("Browse curated collections of places, wildlife, and scenery,");
        ui.label("grouped by category and searchable from the sidebar.");
        ui.add_space(6.0);
        ui.label(
            egui::RichText::new(
                "Add your own catalogue packs at any time via File \u{2192} Import.",
            )
            .weak(),
        );

        ui.add_space(28.0);

        let continue_btn = egui::Button::new(egui::RichText::new("Continue").size(16.0))
            .min_size(egui::vec2(150.0, 36.0));
        if ui.add(continue_btn).clicked() {
            state.complete_onboarding();
        }
    });
}
