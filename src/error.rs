//! Error types for MovieDB Explorer
//!
//! User-facing failures of the search pipeline plus the crate-level error
//! used by the binaries.

use thiserror::Error;

/// Rejected user input. Raised before any network activity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter a movie title.")]
    BlankQuery,
}

/// Failure of the primary search request.
///
/// Every transport-level problem (DNS, refused connection, timeout, non-2xx
/// status) collapses into [`QueryError::ConnectionFailed`]. The `detail`
/// string is for logs; dialogs show [`QueryError::user_message`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Unable to connect to MovieDB API. ({detail})")]
    ConnectionFailed { detail: String },

    #[error("Unexpected response from MovieDB API. ({detail})")]
    MalformedResponse { detail: String },
}

impl QueryError {
    pub fn connection_failed(detail: impl Into<String>) -> Self {
        QueryError::ConnectionFailed {
            detail: detail.into(),
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        QueryError::MalformedResponse {
            detail: detail.into(),
        }
    }

    /// Text shown in the error dialog
    pub fn user_message(&self) -> &'static str {
        match self {
            QueryError::ConnectionFailed { .. } => "Unable to connect to MovieDB API.",
            QueryError::MalformedResponse { .. } => "Unexpected response from MovieDB API.",
        }
    }
}

/// Failure to obtain a poster for a single card. Never escapes the card.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PosterError {
    #[error("Failed to download poster '{url}': {detail}")]
    Fetch { url: String, detail: String },

    #[error("Failed to decode poster: {0}")]
    Decode(String),
}

/// Invalid or missing configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("No API key configured. Set TMDB_API_KEY or pass --api-key")]
    MissingApiKey,

    #[error("Invalid URL for {field}: '{value}' ({reason})")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid timeout for {field}: '{value}'")]
    InvalidTimeout { field: &'static str, value: String },
}

/// Main error type for MovieDB Explorer
#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GUI error: {0}")]
    Gui(String),
}

/// Result type alias for MovieDB Explorer operations
pub type Result<T> = std::result::Result<T, ExplorerError>;

impl ExplorerError {
    /// Whether the error came from something the user typed or the remote
    /// API, as opposed to a local setup problem.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, ExplorerError::Input(_) | ExplorerError::Query(_))
    }
}
