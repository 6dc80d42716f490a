//! Query service: one blocking request against the movie search endpoint

use crate::config::ApiConfig;
use crate::error::QueryError;
use crate::model::{MovieRecord, ResultSet, SearchQuery};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Instant;

/// Anything that can answer a movie search
#[cfg_attr(test, mockall::automock)]
pub trait MovieSearch {
    fn search(&self, query: &SearchQuery) -> Result<ResultSet, QueryError>;
}

/// What happened when the user pressed Search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The input was blank; nothing was sent
    EmptyInput,
    /// The search request failed
    Failed(QueryError),
    /// The API answered (possibly with zero records)
    Loaded(ResultSet),
}

/// Validate raw input and run the search if it is non-blank
pub fn submit(raw_input: &str, service: &dyn MovieSearch) -> SearchOutcome {
    let query = match SearchQuery::parse(raw_input) {
        Ok(query) => query,
        Err(_) => {
            tracing::debug!("blank query rejected");
            return SearchOutcome::EmptyInput;
        }
    };

    match service.search(&query) {
        Ok(results) => SearchOutcome::Loaded(results),
        Err(e) => SearchOutcome::Failed(e),
    }
}

/// HTTP implementation of [`MovieSearch`]
pub struct QueryService {
    client: Client,
    config: ApiConfig,
}

impl QueryService {
    pub fn new(config: ApiConfig) -> crate::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("moviedb-explorer/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }
}

impl MovieSearch for QueryService {
    fn search(&self, query: &SearchQuery) -> Result<ResultSet, QueryError> {
        let endpoint = self.config.search_endpoint();
        let start = Instant::now();
        tracing::info!(query = %query, "searching movies");

        let response = self
            .client
            .get(&endpoint)
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("query", query.as_str()),
            ])
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                // Strip the URL: it carries the API key as a query parameter.
                let e = e.without_url();
                tracing::warn!(error = %e, "search request failed");
                QueryError::connection_failed(e.to_string())
            })?;

        let body = response.bytes().map_err(|e| {
            let e = e.without_url();
            tracing::warn!(error = %e, "failed to read search response");
            QueryError::connection_failed(e.to_string())
        })?;

        let results = parse_search_body(&body)?;
        tracing::info!(
            count = results.len(),
            total = ?results.total_results,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search complete"
        );
        Ok(results)
    }
}

/// Decode a `/search/movie` response body
///
/// A missing `results` key is an empty result set. A body that is not a JSON
/// object, or a `results` value that is not an array, is malformed.
pub fn parse_search_body(body: &[u8]) -> Result<ResultSet, QueryError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(error = %e, "search response is not JSON");
        QueryError::malformed(e.to_string())
    })?;

    let obj = value
        .as_object()
        .ok_or_else(|| QueryError::malformed("response is not a JSON object"))?;

    let records = match obj.get("results") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(MovieRecord::from_json).collect(),
        Some(_) => return Err(QueryError::malformed("'results' is not an array")),
    };

    let total = obj.get("total_results").and_then(Value::as_u64);
    Ok(ResultSet::new(records).with_total_results(total))
}
