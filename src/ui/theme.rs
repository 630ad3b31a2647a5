// Vitrine - ui/theme.rs
//
// Colour palette for art tiles and layout constants.
// No dependencies on app state or business logic.

use egui::Color32;

/// Palette used for art tiles, keyed by a stable hash of the art key so
/// the same key always renders the same colour across runs and platforms.
const ART_PALETTE: &[Color32] = &[
    Color32::from_rgb(217, 119, 6),   // Amber 600
    Color32::from_rgb(5, 150, 105),   // Emerald 600
    Color32::from_rgb(37, 99, 235),   // Blue 600
    Color32::from_rgb(124, 58, 237),  // Violet 600
    Color32::from_rgb(219, 39, 119),  // Pink 600
    Color32::from_rgb(13, 148, 136),  // Teal 600
    Color32::from_rgb(220, 38, 38),   // Red 600
    Color32::from_rgb(101, 163, 13),  // Lime 600
    Color32::from_rgb(2, 132, 199),   // Sky 600
    Color32::from_rgb(234, 88, 12),   // Orange 600
];

/// Colour for an art key.
///
/// Uses FNV-1a over the key bytes; deterministic and cheap, so tiles keep
/// their colour across sessions without storing assignments anywhere.
pub fn art_colour(art: &str) -> Color32 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in art.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    ART_PALETTE[(hash % ART_PALETTE.len() as u64) as usize]
}

/// Foreground colour that reads on any palette tile.
pub const ART_TEXT: Color32 = Color32::from_rgb(250, 250, 249); // Stone 50

/// Paint a rounded art tile with the item's initial glyph centred in it.
///
/// All item art resolves through this painter; catalogues only carry an
/// art key, never image paths.
pub fn paint_art_tile(ui: &mut egui::Ui, rect: egui::Rect, art: &str, name: &str) {
    let painter = ui.painter();
    painter.rect_filled(rect, egui::CornerRadius::same(6), art_colour(art));

    let glyph = name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_else(|| "?".to_string());
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        glyph,
        egui::FontId::proportional(rect.height() * 0.45),
        ART_TEXT,
    );
}

/// Layout constants.
pub const SIDEBAR_WIDTH: f32 = 250.0;
pub const CARD_WIDTH: f32 = 170.0;
pub const CARD_HEIGHT: f32 = 190.0;
pub const CARD_ART_HEIGHT: f32 = 110.0;
pub const CARD_SPACING: f32 = 10.0;
pub const DETAIL_ART_SIZE: f32 = 220.0;
pub const STATUS_BAR_HEIGHT: f32 = 28.0;

#[cfg(test)]
mod tests {
    use super::*;

    /// The same art key must map to the same colour on every call.
    #[test]
    fn test_art_colour_is_stable() {
        assert_eq!(art_colour("sunset"), art_colour("sunset"));
        assert_eq!(art_colour("paris"), art_colour("paris"));
    }

    #[test]
    fn test_art_colour_spreads_keys() {
        let distinct: std::collections::HashSet<_> = ["sunset", "dolphin", "tokyo", "forest"]
            .iter()
            .map(|k| {
                let c = art_colour(k);
                (c.r(), c.g(), c.b())
            })
            .collect();
        // Not a strict requirement, but the palette should not collapse
        // these four common keys onto a single colour.
        assert!(distinct.len() > 1);
    }
}
