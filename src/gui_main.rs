//! MovieDB Explorer GUI Entry Point
//!
//! Launches the desktop search window.

#![windows_subsystem = "windows"]

use console::style;
use moviedb_explorer::logging::{self, LogTarget};
use moviedb_explorer::{ApiConfig, ConfigOverrides};

fn main() {
    logging::init(LogTarget::File);
    tracing::info!(version = moviedb_explorer::VERSION, "MovieDB Explorer GUI starting up");

    let result = ApiConfig::load(&ConfigOverrides::default())
        .map_err(moviedb_explorer::ExplorerError::from)
        .and_then(moviedb_explorer::gui::run);

    if let Err(e) = result {
        tracing::error!(error = %e, "GUI exited with error");
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
