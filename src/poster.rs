//! Poster download and decoding

use crate::config::ApiConfig;
use crate::error::PosterError;
use image::imageops::FilterType;
use reqwest::blocking::Client;

/// Poster width after resizing
pub const POSTER_WIDTH: u32 = 120;
/// Poster height after resizing
pub const POSTER_HEIGHT: u32 = 180;

/// A decoded poster, resized to `POSTER_WIDTH` x `POSTER_HEIGHT`
#[derive(Clone, PartialEq, Eq)]
pub struct PosterImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl std::fmt::Debug for PosterImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

impl PosterImage {
    /// Decode JPEG/PNG bytes and resize to the card poster size
    pub fn decode(bytes: &[u8]) -> Result<Self, PosterError> {
        let decoded =
            image::load_from_memory(bytes).map_err(|e| PosterError::Decode(e.to_string()))?;
        let resized = decoded
            .resize_exact(POSTER_WIDTH, POSTER_HEIGHT, FilterType::Triangle)
            .to_rgba8();
        Ok(Self {
            width: resized.width(),
            height: resized.height(),
            rgba: resized.into_raw(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Unmultiplied RGBA pixels, row-major
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }
}

/// Where poster bytes come from
#[cfg_attr(test, mockall::automock)]
pub trait PosterSource {
    /// URL a poster path resolves to
    fn url_for(&self, poster_path: &str) -> String;

    /// Download the raw bytes of a poster
    fn fetch(&self, poster_path: &str) -> Result<Vec<u8>, PosterError>;
}

/// Downloads posters from the configured image endpoint
pub struct HttpPosterSource {
    client: Client,
    config: ApiConfig,
}

impl HttpPosterSource {
    pub fn new(config: ApiConfig) -> crate::Result<Self> {
        let client = Client::builder()
            .timeout(config.poster_timeout)
            .user_agent(concat!("moviedb-explorer/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }
}

impl PosterSource for HttpPosterSource {
    fn url_for(&self, poster_path: &str) -> String {
        self.config.poster_url(poster_path)
    }

    fn fetch(&self, poster_path: &str) -> Result<Vec<u8>, PosterError> {
        let url = self.url_for(poster_path);
        tracing::debug!(url = %url, "downloading poster");

        let fetch_err = |e: reqwest::Error| PosterError::Fetch {
            url: url.clone(),
            detail: e.to_string(),
        };

        let response = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(fetch_err)?;
        let bytes = response.bytes().map_err(fetch_err)?;
        Ok(bytes.to_vec())
    }
}

/// Fetch and decode one poster
pub fn load_poster(source: &dyn PosterSource, poster_path: &str) -> Result<PosterImage, PosterError> {
    let bytes = source.fetch(poster_path)?;
    PosterImage::decode(&bytes)
}
