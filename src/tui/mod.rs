pub mod app;
pub mod colors;
pub mod list;
pub mod search;
pub mod ui;

pub use app::App;

use crate::config::ApiConfig;
use crate::query::QueryService;
use crate::worker::SearchRunner;
use std::sync::Arc;

/// Entry point: run the terminal UI until the user quits
///
/// Posters are not downloaded here; cards show the poster link instead.
pub fn run(config: ApiConfig) -> crate::Result<()> {
    let image_base_url = config.image_base_url.clone();
    let service = QueryService::new(config)?;
    let mut app = App::new(SearchRunner::new(Arc::new(service), None), image_base_url);

    tracing::info!("starting TUI");
    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}
