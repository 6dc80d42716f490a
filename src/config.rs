//! API configuration
//!
//! The key and endpoints are resolved once at startup from CLI flags, the
//! process environment and an optional `.env` file, in that order of
//! precedence, and then handed to the services that need them.

use crate::error::ConfigError;
use std::fmt;
use std::time::Duration;
use url::Url;

pub const ENV_API_KEY: &str = "TMDB_API_KEY";
pub const ENV_BASE_URL: &str = "MOVIEDB_BASE_URL";
pub const ENV_IMAGE_BASE_URL: &str = "MOVIEDB_IMAGE_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "MOVIEDB_TIMEOUT_SECS";
pub const ENV_POSTER_TIMEOUT_SECS: &str = "MOVIEDB_POSTER_TIMEOUT_SECS";
const FLAG_TIMEOUT_SECS: &str = "--timeout-secs";

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w200";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_POSTER_TIMEOUT_SECS: u64 = 30;

/// Values supplied on the command line. Anything set here wins over the
/// environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub image_base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Connection settings for the search and image endpoints
#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_key: String,
    /// Search API root without a trailing slash
    pub base_url: String,
    /// Prefix that poster paths (which start with `/`) are appended to
    pub image_base_url: String,
    /// Timeout for the primary search request
    pub timeout: Duration,
    /// Timeout for each poster download
    pub poster_timeout: Duration,
}

// Keep the key out of logs and panic messages.
impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("image_base_url", &self.image_base_url)
            .field("timeout", &self.timeout)
            .field("poster_timeout", &self.poster_timeout)
            .finish()
    }
}

impl ApiConfig {
    /// Build a config with the default endpoints and timeouts
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            poster_timeout: Duration::from_secs(DEFAULT_POSTER_TIMEOUT_SECS),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = normalize_url("base_url", base_url)?;
        Ok(self)
    }

    pub fn with_image_base_url(mut self, image_base_url: &str) -> Result<Self, ConfigError> {
        self.image_base_url = normalize_url("image_base_url", image_base_url)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poster_timeout(mut self, timeout: Duration) -> Self {
        self.poster_timeout = timeout;
        self
    }

    /// Load `.env` (if present) and resolve from the process environment
    pub fn load(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env file"),
        }
        Self::from_lookup(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve configuration with an explicit variable lookup
    pub fn from_lookup<F>(overrides: &ConfigOverrides, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        // A blank flag counts as not given
        let flag = |value: &Option<String>| value.clone().filter(|v| !v.trim().is_empty());

        let api_key = flag(&overrides.api_key)
            .or_else(|| non_empty(ENV_API_KEY))
            .map(|k| k.trim().to_string())
            .ok_or(ConfigError::MissingApiKey)?;

        let mut config = Self::new(api_key);

        if let Some(base_url) = flag(&overrides.base_url).or_else(|| non_empty(ENV_BASE_URL)) {
            config = config.with_base_url(&base_url)?;
        }

        if let Some(image_base_url) =
            flag(&overrides.image_base_url).or_else(|| non_empty(ENV_IMAGE_BASE_URL))
        {
            config = config.with_image_base_url(&image_base_url)?;
        }

        let timeout_secs = match overrides.timeout_secs {
            Some(secs) => Some(parse_secs(FLAG_TIMEOUT_SECS, &secs.to_string())?),
            None => non_empty(ENV_TIMEOUT_SECS)
                .map(|v| parse_secs(ENV_TIMEOUT_SECS, &v))
                .transpose()?,
        };
        if let Some(secs) = timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }

        if let Some(v) = non_empty(ENV_POSTER_TIMEOUT_SECS) {
            let secs = parse_secs(ENV_POSTER_TIMEOUT_SECS, &v)?;
            config = config.with_poster_timeout(Duration::from_secs(secs));
        }

        tracing::debug!(config = ?config, "resolved API configuration");
        Ok(config)
    }

    /// Endpoint of the movie search request
    pub fn search_endpoint(&self) -> String {
        format!("{}/search/movie", self.base_url)
    }

    /// Full URL of a poster given its API path
    pub fn poster_url(&self, poster_path: &str) -> String {
        format!("{}{}", self.image_base_url, poster_path)
    }
}

fn normalize_url(field: &'static str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|e| ConfigError::InvalidUrl {
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    Ok(trimmed.to_string())
}

fn parse_secs(field: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .ok_or_else(|| ConfigError::InvalidTimeout {
            field,
            value: value.to_string(),
        })
}
