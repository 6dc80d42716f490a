//! Main MovieDB Explorer window

use crate::gui::card::CardView;
use crate::gui::colors;
use crate::gui::dialogs;
use crate::gui::search::SearchState;
use crate::model::SearchQuery;
use crate::render::{apply, Content, Display, Prepared, NO_RESULTS_TEXT};
use crate::worker::SearchRunner;
use eframe::egui;

/// Main application state
pub struct ExplorerApp {
    /// Search state
    search: SearchState,
    /// Runs searches off the UI thread
    runner: SearchRunner,
    /// Rendered result model (content kind + notice)
    display: Display,
    /// Cards currently on screen; each owns its poster texture
    cards: Vec<CardView>,
    /// Show about dialog
    show_about: bool,
    /// Status bar message
    status_message: String,
}

impl ExplorerApp {
    /// Create a new ExplorerApp
    pub fn new(cc: &eframe::CreationContext<'_>, runner: SearchRunner) -> Self {
        cc.egui_ctx.set_visuals(colors::visuals());

        Self {
            search: SearchState::default(),
            runner,
            display: Display::new(),
            cards: Vec::new(),
            show_about: false,
            status_message: "Ready".to_string(),
        }
    }

    /// Validate the query and start a search
    fn start_search(&mut self) {
        let query = match SearchQuery::parse(&self.search.query) {
            Ok(query) => query,
            Err(_) => {
                // Existing results stay on screen behind the warning.
                apply(&mut self.display, Prepared::EmptyInput);
                return;
            }
        };

        // Release the old cards and textures before new posters arrive.
        self.cards.clear();
        self.display.clear();
        self.status_message = format!("Searching for \"{}\"...", query);
        self.runner.start(query);
    }

    /// Apply a finished search
    fn process_results(&mut self, ctx: &egui::Context) {
        let Some(prepared) = self.runner.poll() else {
            return;
        };

        apply(&mut self.display, prepared);
        self.cards = self
            .display
            .take_cards()
            .into_iter()
            .enumerate()
            .map(|(index, card)| CardView::new(ctx, card, index))
            .collect();

        self.status_message = match (self.display.notice(), self.cards.len()) {
            (Some(notice), _) => notice.message.clone(),
            (None, 0) => "No results".to_string(),
            (None, shown) => match self.display.total_results {
                Some(total) => format!("Showing {} of {} results", shown, total),
                None => format!("Showing {} results", shown),
            },
        };
        tracing::debug!(
            cards = self.cards.len(),
            textures = self.cards.iter().filter(|c| c.has_texture()).count(),
            "results on screen"
        );
    }

    /// Render header with title and About button
    fn render_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::new()
                    .fill(colors::HEADER)
                    .inner_margin(egui::Margin::symmetric(20, 14)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(format!("\u{1F3AC} {}", crate::APP_NAME))
                            .size(24.0)
                            .strong()
                            .color(colors::TEXT),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("About").clicked() {
                            self.show_about = true;
                        }
                    });
                });
            });
    }

    /// Render search bar
    fn render_search_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("search_bar")
            .frame(
                egui::Frame::new()
                    .fill(colors::BG)
                    .inner_margin(egui::Margin::symmetric(20, 15)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.search.query)
                            .desired_width(400.0)
                            .font(egui::TextStyle::Heading)
                            .hint_text("Movie title..."),
                    );

                    if self.search.first_frame {
                        response.request_focus();
                        self.search.first_frame = false;
                    }

                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        self.search.submit_requested = true;
                    }

                    let button = egui::Button::new(
                        egui::RichText::new("Search")
                            .strong()
                            .size(15.0)
                            .color(egui::Color32::BLACK),
                    )
                    .fill(colors::ACCENT)
                    .min_size(egui::vec2(100.0, 30.0));
                    if ui.add(button).clicked() {
                        self.search.submit_requested = true;
                    }

                    if self.runner.is_busy() {
                        ui.spinner();
                    }
                });
            });
    }

    /// Render status bar
    fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                egui::Frame::new()
                    .fill(colors::HEADER)
                    .inner_margin(egui::Margin::symmetric(10, 4)),
            )
            .show(ctx, |ui| {
                ui.label(egui::RichText::new(&self.status_message).color(colors::MUTED_TEXT));
            });
    }

    /// Render the scrollable card list
    fn render_results(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                if !self.cards.is_empty() {
                    for card in &self.cards {
                        card.show(ui);
                    }
                    return;
                }

                if *self.display.content() == Content::NoResults {
                    ui.vertical_centered(|ui| {
                        ui.add_space(30.0);
                        ui.label(
                            egui::RichText::new(NO_RESULTS_TEXT)
                                .size(15.0)
                                .color(colors::MUTED_TEXT),
                        );
                    });
                }
            });
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_results(ctx);

        if self.search.take_submit() {
            self.start_search();
        }

        self.render_header(ctx);
        self.render_search_bar(ctx);
        self.render_status_bar(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(colors::BG))
            .show(ctx, |ui| {
                self.render_results(ui);
            });

        if let Some(notice) = self.display.notice().cloned() {
            if !dialogs::show_notice_dialog(ctx, &notice) {
                self.display.dismiss_notice();
            }
        }

        if self.show_about {
            self.show_about = dialogs::show_about_dialog(ctx);
        }

        if self.runner.is_busy() {
            ctx.request_repaint();
        }
    }
}
