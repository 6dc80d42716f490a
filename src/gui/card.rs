//! On-screen result cards
//!
//! A `CardView` owns the GPU texture of its poster. Dropping the view frees
//! the texture, so replacing the card list never leaks images.

use crate::gui::colors;
use crate::poster::{POSTER_HEIGHT, POSTER_WIDTH};
use crate::render::{Card, PosterSlot, NO_IMAGE_TEXT};
use eframe::egui;

const OVERVIEW_WRAP_WIDTH: f32 = 550.0;

enum PosterView {
    Texture(egui::TextureHandle),
    Placeholder,
}

pub struct CardView {
    title: String,
    meta_line: String,
    overview: String,
    poster: PosterView,
}

impl CardView {
    /// Upload the card's poster (if any) and keep only what is drawn
    pub fn new(ctx: &egui::Context, card: Card, index: usize) -> Self {
        let poster = match card.poster {
            PosterSlot::Image(img) => {
                let color_image = egui::ColorImage::from_rgba_unmultiplied(
                    [img.width() as usize, img.height() as usize],
                    img.rgba(),
                );
                PosterView::Texture(ctx.load_texture(
                    format!("poster-{index}"),
                    color_image,
                    egui::TextureOptions::LINEAR,
                ))
            }
            PosterSlot::Missing | PosterSlot::Deferred { .. } | PosterSlot::Unavailable { .. } => {
                PosterView::Placeholder
            }
        };

        Self {
            title: card.title,
            meta_line: card.meta_line,
            overview: card.overview,
            poster,
        }
    }

    pub fn has_texture(&self) -> bool {
        matches!(self.poster, PosterView::Texture(_))
    }

    pub fn show(&self, ui: &mut egui::Ui) {
        let poster_size = egui::vec2(POSTER_WIDTH as f32, POSTER_HEIGHT as f32);

        egui::Frame::new()
            .fill(colors::CARD)
            .inner_margin(egui::Margin::same(15))
            .outer_margin(egui::Margin::symmetric(20, 10))
            .corner_radius(4)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal_top(|ui| {
                    ui.add_space(10.0);
                    match &self.poster {
                        PosterView::Texture(texture) => {
                            ui.add(
                                egui::Image::from_texture(egui::load::SizedTexture::from_handle(
                                    texture,
                                ))
                                .fit_to_exact_size(poster_size),
                            );
                        }
                        PosterView::Placeholder => draw_placeholder(ui, poster_size),
                    }
                    ui.add_space(20.0);

                    ui.vertical(|ui| {
                        ui.label(
                            egui::RichText::new(&self.title)
                                .size(18.0)
                                .strong()
                                .color(colors::TEXT),
                        );
                        ui.add_space(5.0);
                        ui.label(
                            egui::RichText::new(&self.meta_line)
                                .size(13.0)
                                .color(colors::ACCENT),
                        );
                        ui.add_space(5.0);
                        ui.set_max_width(OVERVIEW_WRAP_WIDTH);
                        ui.add(
                            egui::Label::new(
                                egui::RichText::new(&self.overview).color(colors::MUTED_TEXT),
                            )
                            .wrap(),
                        );
                    });
                });
            });
    }
}

fn draw_placeholder(ui: &mut egui::Ui, size: egui::Vec2) {
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    ui.painter().rect_filled(rect, 0.0, colors::PLACEHOLDER);
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        NO_IMAGE_TEXT,
        egui::FontId::proportional(13.0),
        colors::MUTED_TEXT,
    );
}
