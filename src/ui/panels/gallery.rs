// Vitrine - ui/panels/gallery.rs
//
// Grouped gallery view: one section per category, in first-seen order,
// with clickable item cards flowing left to right.
//
// Cards are painted directly (allocate + painter) rather than composed
// from widgets so a whole card is a single click target with no dead
// zones between its art, name, and summary.

use crate::app::state::AppState;
use crate::ui::theme;

/// Render the gallery panel (central area).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    if state.visible_indices.is_empty() {
        ui.centered_and_justified(|ui| {
            if state.items.is_empty() {
                ui.label(
                    "No catalogues loaded.\nImport a catalogue pack via File \u{2192} Import.",
                );
            } else {
                ui.label("No items match the current filters.");
            }
        });
        return;
    }

    let groups = state.grouped();

    // Clicks are collected here and applied after the scroll area so we
    // do not mutable-borrow `state` while `item` still holds an
    // immutable reference into `state.items`.
    let mut clicked: Option<usize> = None;

    egui::ScrollArea::vertical()
        .id_salt("gallery_scroll")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for group in &groups {
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.heading(&group.category);
                    ui.label(
                        egui::RichText::new(format!("({})", group.item_indices.len()))
                            .weak()
                            .size(12.0),
                    );
                });
                ui.add_space(4.0);

                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing =
                        egui::vec2(theme::CARD_SPACING, theme::CARD_SPACING);
                    for &item_idx in &group.item_indices {
                        let Some(item) = state.items.get(item_idx) else {
                            continue;
                        };
                        if render_card(ui, item) {
                            clicked = Some(item_idx);
                        }
                    }
                });

                ui.add_space(8.0);
                ui.separator();
            }
        });

    if let Some(item_idx) = clicked {
        state.select(item_idx);
    }
}

/// Paint a single item card. Returns true when the card was clicked.
fn render_card(ui: &mut egui::Ui, item: &crate::core::model::GalleryItem) -> bool {
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(theme::CARD_WIDTH, theme::CARD_HEIGHT),
        egui::Sense::click(),
    );

    if ui.is_rect_visible(rect) {
        let visuals = ui.style().visuals.clone();
        let bg = if response.hovered() {
            visuals.widgets.hovered.bg_fill
        } else {
            visuals.faint_bg_color
        };

        let painter = ui.painter();
        painter.rect_filled(rect, egui::CornerRadius::same(8), bg);
        painter.rect_stroke(
            rect,
            egui::CornerRadius::same(8),
            visuals.widgets.noninteractive.bg_stroke,
            egui::StrokeKind::Inside,
        );

        // Art tile across the top of the card.
        let art_rect = egui::Rect::from_min_size(
            rect.min + egui::vec2(8.0, 8.0),
            egui::vec2(theme::CARD_WIDTH - 16.0, theme::CARD_ART_HEIGHT),
        );
        theme::paint_art_tile(ui, art_rect, &item.art, &item.name);

        // Name and summary beneath the art.
        let text_x = rect.min.x + 10.0;
        let max_chars = 22;
        ui.painter().text(
            egui::pos2(text_x, art_rect.max.y + 10.0),
            egui::Align2::LEFT_TOP,
            truncate(&item.name, max_chars),
            egui::FontId::proportional(14.5),
            visuals.strong_text_color(),
        );
        ui.painter().text(
            egui::pos2(text_x, art_rect.max.y + 32.0),
            egui::Align2::LEFT_TOP,
            truncate(&item.summary, max_chars + 4),
            egui::FontId::proportional(11.5),
            visuals.weak_text_color(),
        );
    }

    // Full summary as tooltip on hover (card text is truncated).
    let response = response.on_hover_ui(|ui| {
        ui.strong(&item.name);
        if !item.summary.is_empty() {
            ui.label(&item.summary);
        }
    });

    response.clicked()
}

/// Truncate `s` to `max` characters with a trailing ellipsis.
fn truncate(s: &str, max: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max {
        s.to_string()
    } else {
        let mut out: String = chars[..max.saturating_sub(1)].iter().collect();
        out.push('\u{2026}');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate("Paris", 22), "Paris");
    }

    #[test]
    fn test_truncate_long_string_ellipsised() {
        let out = truncate("An exceptionally long item name", 10);
        assert_eq!(out.chars().count(), 10);
        assert!(out.ends_with('\u{2026}'));
    }
}
