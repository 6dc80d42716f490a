//! MovieDB Explorer - search TMDB by title and browse the results
//!
//! The crate is built around one pipeline: a query typed by the user is
//! validated, sent to the TMDB `/search/movie` endpoint, and the response is
//! rendered into at most ten result cards (poster, title, year, rating,
//! synopsis). The desktop window, the terminal UI and the CLI all drive the
//! same pipeline.
//!
//! # Example
//!
//! ```no_run
//! use moviedb_explorer::{render, submit, ApiConfig, ConfigOverrides, Display, QueryService};
//!
//! fn main() -> moviedb_explorer::Result<()> {
//!     let config = ApiConfig::load(&ConfigOverrides::default())?;
//!     let service = QueryService::new(config)?;
//!
//!     let mut display = Display::new();
//!     render(&mut display, submit("Inception", &service), None);
//!
//!     for card in display.cards() {
//!         println!("{}\n{}\n{}\n", card.title, card.meta_line, card.overview);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod gui;
pub mod logging;
pub mod model;
pub mod poster;
pub mod query;
pub mod render;
pub mod tui;
pub mod worker;

// Re-export main types
pub use config::{ApiConfig, ConfigOverrides};
pub use error::{ConfigError, ExplorerError, InputError, PosterError, QueryError, Result};
pub use model::{MovieRecord, Rating, ResultSet, SearchQuery, MAX_CARDS};
pub use poster::{HttpPosterSource, PosterImage, PosterSource};
pub use query::{submit, MovieSearch, QueryService, SearchOutcome};
pub use render::{apply, prepare, render, Card, Content, Display, Notice, NoticeKind, PosterSlot};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name shown in window titles and headers
pub const APP_NAME: &str = "MovieDB Explorer";
