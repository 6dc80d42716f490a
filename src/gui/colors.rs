use eframe::egui::{self, Color32};

pub const BG: Color32 = Color32::from_rgb(0x1c, 0x1f, 0x26);
pub const HEADER: Color32 = Color32::from_rgb(0x14, 0x16, 0x1d);
pub const CARD: Color32 = Color32::from_rgb(0x2a, 0x2f, 0x3a);
pub const PLACEHOLDER: Color32 = Color32::from_rgb(0x3a, 0x3f, 0x4b);
pub const TEXT: Color32 = Color32::WHITE;
pub const MUTED_TEXT: Color32 = Color32::from_rgb(0xb0, 0xb3, 0xb8);
pub const ACCENT: Color32 = Color32::from_rgb(0x1d, 0xb9, 0x54);
pub const ACCENT_HOVER: Color32 = Color32::from_rgb(0x17, 0xa7, 0x4a);

/// Dark visuals tinted with the app palette
pub fn visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = BG;
    visuals.window_fill = CARD;
    visuals.extreme_bg_color = CARD;
    visuals.override_text_color = Some(TEXT);
    visuals.selection.bg_fill = ACCENT_HOVER;
    visuals.widgets.hovered.weak_bg_fill = ACCENT_HOVER;
    visuals
}
