//! MovieDB Explorer CLI
//!
//! Searches TMDB from the command line, or launches the desktop and
//! terminal front ends.

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use moviedb_explorer::logging::{self, LogTarget};
use moviedb_explorer::{
    render, submit, ApiConfig, Card, ConfigOverrides, Content, Display, ExplorerError,
    InputError, QueryService, SearchOutcome,
};
use std::time::Duration;

/// MovieDB Explorer - search movies by title
///
/// Needs a TMDB API key in `TMDB_API_KEY` (or a `.env` file, or `--api-key`).
#[derive(Parser)]
#[command(name = "moviedb")]
#[command(author = "MovieDB Explorer Contributors")]
#[command(version)]
#[command(about = "Search The Movie Database by title", long_about = None)]
struct Cli {
    /// TMDB API key (overrides TMDB_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Search API root (overrides MOVIEDB_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Poster URL prefix (overrides MOVIEDB_IMAGE_BASE_URL)
    #[arg(long, global = true)]
    image_base_url: Option<String>,

    /// Search request timeout in seconds (overrides MOVIEDB_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a movie title and print up to ten results
    Search {
        /// Movie title (use -- before a title that starts with -)
        #[arg(allow_hyphen_values = true)]
        title: String,

        /// Print the cards as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Launch the desktop window
    Gui,

    /// Launch the terminal UI
    Tui,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            image_base_url: self.image_base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    logging::init(match cli.command {
        Commands::Search { .. } => LogTarget::Stderr,
        Commands::Gui | Commands::Tui => LogTarget::File,
    });
    tracing::info!(version = moviedb_explorer::VERSION, "MovieDB Explorer starting up");

    let result = ApiConfig::load(&cli.overrides())
        .map_err(ExplorerError::from)
        .and_then(|config| match &cli.command {
            Commands::Search { title, json } => cmd_search(config, title, *json),
            Commands::Gui => moviedb_explorer::gui::run(config),
            Commands::Tui => moviedb_explorer::tui::run(config),
        });

    if let Err(e) = result {
        tracing::debug!(error = ?e, user_facing = e.is_user_facing(), "exiting with error");
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

/// Search command implementation
fn cmd_search(config: ApiConfig, title: &str, json: bool) -> moviedb_explorer::Result<()> {
    let service = QueryService::new(config.clone())?;

    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
    {
        spinner.set_style(spinner_style);
    }
    spinner.set_message(format!("Searching for '{}'...", title.trim()));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let outcome = submit(title, &service);
    spinner.finish_and_clear();

    let results = match outcome {
        SearchOutcome::EmptyInput => return Err(InputError::BlankQuery.into()),
        SearchOutcome::Failed(err) => return Err(err.into()),
        loaded => loaded,
    };

    let mut display = Display::new();
    // Posters are links in a terminal, nothing to download.
    render(&mut display, results, None);

    let cards = with_poster_urls(display.cards(), &config);
    if json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    if matches!(display.content(), Content::NoResults) {
        println!("{}", style(moviedb_explorer::render::NO_RESULTS_TEXT).dim());
        return Ok(());
    }

    println!();
    for card in &cards {
        print_card(card);
    }
    match display.total_results {
        Some(total) => println!(
            "{} Showing {} of {} results",
            style("✓").green().bold(),
            style(cards.len()).green(),
            total
        ),
        None => println!(
            "{} Showing {} results",
            style("✓").green().bold(),
            style(cards.len()).green()
        ),
    }

    Ok(())
}

/// Cards with full poster links filled in for output
fn with_poster_urls(cards: &[Card], config: &ApiConfig) -> Vec<Card> {
    cards
        .iter()
        .cloned()
        .map(|mut card| {
            if let Some(path) = card.poster.deferred_path() {
                card.poster_url = Some(config.poster_url(path));
            }
            card
        })
        .collect()
}

fn print_card(card: &Card) {
    println!("  {}", style(&card.title).bold());
    println!("  {}", style(&card.meta_line).green());
    println!("  {}", card.overview);
    match &card.poster_url {
        Some(url) => println!("  {}", style(url).dim()),
        None => println!(
            "  {}",
            style(format!("[{}]", moviedb_explorer::render::NO_IMAGE_TEXT)).dim()
        ),
    }
    println!();
}
