pub mod app;
pub mod card;
pub mod colors;
pub mod dialogs;
pub mod search;

pub use app::ExplorerApp;

use crate::config::ApiConfig;
use crate::poster::HttpPosterSource;
use crate::query::QueryService;
use crate::worker::SearchRunner;
use std::sync::Arc;

/// Entry point: launch the native GUI window
pub fn run(config: ApiConfig) -> crate::Result<()> {
    let service = QueryService::new(config.clone())?;
    let posters = HttpPosterSource::new(config)?;
    let runner = SearchRunner::new(Arc::new(service), Some(Arc::new(posters)));

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title(crate::APP_NAME)
            .with_inner_size([900.0, 600.0])
            .with_resizable(false),
        ..Default::default()
    };

    tracing::info!("starting GUI");
    eframe::run_native(
        crate::APP_NAME,
        native_options,
        Box::new(move |cc| Ok(Box::new(ExplorerApp::new(cc, runner)))),
    )
    .map_err(|e| crate::ExplorerError::Gui(e.to_string()))
}
