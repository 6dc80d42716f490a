use crate::gui::colors;
use crate::render::{Notice, NoticeKind};
use eframe::egui;

/// Show a blocking notice. Returns true when the dialog should remain open.
pub fn show_notice_dialog(ctx: &egui::Context, notice: &Notice) -> bool {
    let mut open = true;

    let (icon, icon_color) = match notice.kind {
        NoticeKind::Warning => ("\u{26A0}", egui::Color32::from_rgb(230, 190, 40)),
        NoticeKind::Error => ("\u{2716}", egui::Color32::from_rgb(230, 80, 80)),
    };

    let modal = egui::Modal::new(egui::Id::new("notice_dialog")).show(ctx, |ui| {
        ui.set_width(320.0);
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(icon).size(20.0).color(icon_color));
            ui.heading(&notice.title);
        });
        ui.add_space(8.0);
        ui.label(&notice.message);
        ui.add_space(12.0);
        ui.vertical_centered(|ui| {
            let ok = egui::Button::new(egui::RichText::new("OK").color(egui::Color32::BLACK))
                .fill(colors::ACCENT)
                .min_size(egui::vec2(80.0, 0.0));
            if ui.add(ok).clicked() || ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                open = false;
            }
        });
    });

    if modal.should_close() {
        open = false;
    }
    open
}

/// About dialog. Returns true when the dialog should remain open.
pub fn show_about_dialog(ctx: &egui::Context) -> bool {
    let mut open = true;

    egui::Window::new(format!("About {}", crate::APP_NAME))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(crate::APP_NAME);
                ui.label(format!("Version {}", crate::VERSION));
                ui.add_space(10.0);
                ui.label("Movie search powered by the TMDB API");
                ui.add_space(10.0);
                if ui.button("OK").clicked() {
                    open = false;
                }
            });
        });

    open
}
