//! Search results as decoded from the API

use crate::error::InputError;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::fmt;

/// Maximum number of cards rendered for one search
pub const MAX_CARDS: usize = 10;

pub const DEFAULT_TITLE: &str = "N/A";
pub const DEFAULT_OVERVIEW: &str = "No overview available.";

/// A validated, trimmed, non-empty search string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn parse(input: &str) -> Result<Self, InputError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(InputError::BlankQuery);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Average vote as sent by the API
///
/// The original JSON number is kept so `8` stays `8` and `7.0` stays `7.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rating {
    Score(Number),
    NotAvailable,
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Score(n) => write!(f, "{}", n),
            Rating::NotAvailable => f.write_str("N/A"),
        }
    }
}

impl Serialize for Rating {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Rating::Score(n) => n.serialize(serializer),
            Rating::NotAvailable => serializer.serialize_str("N/A"),
        }
    }
}

/// One search result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub title: String,
    pub release_year: String,
    pub rating: Rating,
    pub overview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
}

impl MovieRecord {
    /// Decode a raw result object, filling in defaults for anything absent
    /// or of the wrong type. Never fails.
    pub fn from_json(value: &Value) -> Self {
        let empty = Map::new();
        let obj = value.as_object().unwrap_or(&empty);
        let text = |key: &str| obj.get(key).and_then(Value::as_str);

        let title = text("title").unwrap_or(DEFAULT_TITLE).to_string();
        let release_year = release_year(text("release_date").unwrap_or(""));
        let rating = match obj.get("vote_average") {
            Some(Value::Number(n)) => Rating::Score(n.clone()),
            _ => Rating::NotAvailable,
        };
        let overview = text("overview").unwrap_or(DEFAULT_OVERVIEW).to_string();
        let poster_path = text("poster_path")
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        let id = obj.get("id").and_then(Value::as_u64);

        Self {
            id,
            title,
            release_year,
            rating,
            overview,
            poster_path,
        }
    }

    /// Second line of a card: `"{year}   ⭐ {rating}/10"`
    pub fn meta_line(&self) -> String {
        format!("{}   \u{2B50} {}/10", self.release_year, self.rating)
    }
}

/// First four characters of a release date (`"2010-07-15"` -> `"2010"`)
pub fn release_year(release_date: &str) -> String {
    release_date.chars().take(4).collect()
}

/// Ordered results of one search, exactly as the API returned them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    records: Vec<MovieRecord>,
    /// `total_results` reported by the API, if any
    pub total_results: Option<u64>,
}

impl ResultSet {
    pub fn new(records: Vec<MovieRecord>) -> Self {
        Self {
            records,
            total_results: None,
        }
    }

    pub fn with_total_results(mut self, total: Option<u64>) -> Self {
        self.total_results = total;
        self
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    /// The records that get a card, in API order
    pub fn displayed(&self) -> &[MovieRecord] {
        &self.records[..self.records.len().min(MAX_CARDS)]
    }
}
