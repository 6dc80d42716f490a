//! Result renderer
//!
//! Turns a [`SearchOutcome`] into a toolkit-independent [`Display`]: the
//! list of cards (or a placeholder) plus an optional blocking notice. The
//! GUI and TUI draw a `Display`; neither decides on its own what to show.

use crate::model::MovieRecord;
use crate::poster::{load_poster, PosterImage, PosterSource};
use crate::query::SearchOutcome;
use serde::Serialize;

pub const NO_RESULTS_TEXT: &str = "No results found.";
pub const NO_IMAGE_TEXT: &str = "No Image";

/// Severity of a blocking notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Warning,
    Error,
}

/// A modal message the user has to dismiss
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn input_error() -> Self {
        Self {
            kind: NoticeKind::Warning,
            title: "Input Error".to_string(),
            message: crate::error::InputError::BlankQuery.to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Error".to_string(),
            message: message.into(),
        }
    }
}

/// What occupies the poster area of a card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosterSlot {
    /// Downloaded and decoded
    Image(PosterImage),
    /// The record has no poster path
    Missing,
    /// The poster exists but was not fetched (text front ends)
    Deferred { path: String },
    /// Fetching or decoding failed; shown like `Missing`
    Unavailable { url: String, reason: String },
}

impl PosterSlot {
    pub fn image(&self) -> Option<&PosterImage> {
        match self {
            PosterSlot::Image(img) => Some(img),
            _ => None,
        }
    }

    /// API path of a poster that was not downloaded
    pub fn deferred_path(&self) -> Option<&str> {
        match self {
            PosterSlot::Deferred { path } => Some(path),
            _ => None,
        }
    }
}

/// One rendered search result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub title: String,
    /// `"{year}   ⭐ {rating}/10"`
    pub meta_line: String,
    pub overview: String,
    #[serde(skip)]
    pub poster: PosterSlot,
    /// Resolved URL of a poster that was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

impl Card {
    /// Build the card for one record. A poster is fetched only when the
    /// record has a poster path and a source is given.
    pub fn build(record: &MovieRecord, posters: Option<&dyn PosterSource>) -> Self {
        let (poster, poster_url) = match (&record.poster_path, posters) {
            (None, _) => (PosterSlot::Missing, None),
            (Some(path), None) => (PosterSlot::Deferred { path: path.clone() }, None),
            (Some(path), Some(source)) => {
                let url = source.url_for(path);
                let slot = match load_poster(source, path) {
                    Ok(img) => PosterSlot::Image(img),
                    Err(e) => {
                        tracing::warn!(title = %record.title, error = %e, "poster unavailable");
                        PosterSlot::Unavailable {
                            url: url.clone(),
                            reason: e.to_string(),
                        }
                    }
                };
                (slot, Some(url))
            }
        };

        Self {
            title: record.title.clone(),
            meta_line: record.meta_line(),
            overview: record.overview.clone(),
            poster,
            poster_url,
        }
    }

    pub fn has_image(&self) -> bool {
        self.poster.image().is_some()
    }
}

/// Content of the result area
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Content {
    /// Nothing searched yet, or cleared by an error
    #[default]
    Empty,
    /// Successful search without results
    NoResults,
    /// One card per displayed record, in API order
    Cards(Vec<Card>),
}

/// Everything a front end needs to draw the results region
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Display {
    content: Content,
    notice: Option<Notice>,
    /// Number of records the API returned for the last successful search
    pub result_count: usize,
    /// `total_results` of the last successful search, if reported
    pub total_results: Option<u64>,
}

impl Display {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn cards(&self) -> &[Card] {
        match &self.content {
            Content::Cards(cards) => cards,
            _ => &[],
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Number of decoded posters currently held
    pub fn poster_count(&self) -> usize {
        self.cards().iter().filter(|c| c.has_image()).count()
    }

    /// Drop all cards and their posters
    pub fn clear(&mut self) {
        self.content = Content::Empty;
        self.result_count = 0;
        self.total_results = None;
    }

    /// Take the cards out, leaving the display empty
    pub fn take_cards(&mut self) -> Vec<Card> {
        match std::mem::take(&mut self.content) {
            Content::Cards(cards) => cards,
            other => {
                self.content = other;
                Vec::new()
            }
        }
    }
}

/// A search outcome with its cards already built
///
/// Building cards downloads posters, so front ends that search off the UI
/// thread call [`prepare`] there and [`apply`] on the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum Prepared {
    EmptyInput,
    Failed(crate::error::QueryError),
    Loaded {
        cards: Vec<Card>,
        result_count: usize,
        total_results: Option<u64>,
    },
}

/// Build the cards for an outcome, fetching posters through `posters`
pub fn prepare(outcome: SearchOutcome, posters: Option<&dyn PosterSource>) -> Prepared {
    match outcome {
        SearchOutcome::EmptyInput => Prepared::EmptyInput,
        SearchOutcome::Failed(err) => Prepared::Failed(err),
        SearchOutcome::Loaded(results) => {
            let cards: Vec<Card> = results
                .displayed()
                .iter()
                .map(|record| Card::build(record, posters))
                .collect();
            tracing::debug!(cards = cards.len(), "rendered result cards");
            Prepared::Loaded {
                cards,
                result_count: results.len(),
                total_results: results.total_results,
            }
        }
    }
}

/// Replace the display contents with a prepared outcome
pub fn apply(display: &mut Display, prepared: Prepared) {
    match prepared {
        Prepared::EmptyInput => {
            display.notice = Some(Notice::input_error());
        }
        Prepared::Failed(err) => {
            display.clear();
            tracing::error!(error = %err, "search failed");
            display.notice = Some(Notice::error(err.user_message()));
        }
        Prepared::Loaded {
            cards,
            result_count,
            total_results,
        } => {
            display.clear();
            display.notice = None;
            display.result_count = result_count;
            display.total_results = total_results;
            display.content = if cards.is_empty() {
                Content::NoResults
            } else {
                Content::Cards(cards)
            };
        }
    }
}

/// Apply a search outcome to the display
///
/// On a successful search the previous cards, and the posters they own,
/// are dropped before any new poster is downloaded.
pub fn render(display: &mut Display, outcome: SearchOutcome, posters: Option<&dyn PosterSource>) {
    if matches!(outcome, SearchOutcome::Loaded(_)) {
        display.clear();
    }
    apply(display, prepare(outcome, posters));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PosterError, QueryError};
    use crate::model::{ResultSet, MAX_CARDS};
    use crate::poster::test_images::png;
    use crate::poster::MockPosterSource;
    use mockall::predicate::eq;
    use serde_json::json;

    fn record(value: serde_json::Value) -> MovieRecord {
        MovieRecord::from_json(&value)
    }

    fn loaded(records: Vec<MovieRecord>) -> SearchOutcome {
        SearchOutcome::Loaded(ResultSet::new(records))
    }

    fn source_ok() -> MockPosterSource {
        let mut source = MockPosterSource::new();
        source
            .expect_url_for()
            .returning(|p| format!("http://img.local{p}"));
        source
            .expect_fetch()
            .returning(|_| Ok(png(8, 12, [10, 20, 30, 255])));
        source
    }

    #[test]
    fn initial_display_is_idle() {
        let display = Display::new();
        assert_eq!(display.content(), &Content::Empty);
        assert!(display.notice().is_none());
    }

    #[test]
    fn empty_input_warns_without_touching_content() {
        let mut display = Display::new();
        render(&mut display, loaded(vec![record(json!({"title": "Kept"}))]), None);

        render(&mut display, SearchOutcome::EmptyInput, None);
        assert_eq!(display.cards().len(), 1);
        assert_eq!(display.cards()[0].title, "Kept");
        let notice = display.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Warning);
        assert_eq!(notice.title, "Input Error");
        assert_eq!(notice.message, "Please enter a movie title.");
    }

    #[test]
    fn failure_clears_and_reports() {
        let mut display = Display::new();
        render(&mut display, loaded(vec![record(json!({"title": "Old"}))]), None);

        render(
            &mut display,
            SearchOutcome::Failed(QueryError::connection_failed("timed out")),
            None,
        );
        assert_eq!(display.content(), &Content::Empty);
        assert!(display.cards().is_empty());
        let notice = display.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "Unable to connect to MovieDB API.");
    }

    #[test]
    fn zero_records_show_placeholder() {
        let mut display = Display::new();
        render(&mut display, loaded(vec![]), None);
        assert_eq!(display.content(), &Content::NoResults);
        assert!(display.notice().is_none());
    }

    #[test]
    fn cards_capped_at_ten_in_api_order() {
        let records: Vec<MovieRecord> = (0..13)
            .map(|i| record(json!({ "title": format!("T{i}") })))
            .collect();
        let mut display = Display::new();
        render(&mut display, loaded(records), None);

        let titles: Vec<&str> = display.cards().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles.len(), MAX_CARDS);
        assert_eq!(titles, ["T0", "T1", "T2", "T3", "T4", "T5", "T6", "T7", "T8", "T9"]);
        assert_eq!(display.result_count, 13);
    }

    #[test]
    fn missing_poster_path_never_fetches() {
        let mut source = MockPosterSource::new();
        source.expect_fetch().times(0);
        source.expect_url_for().times(0);

        let mut display = Display::new();
        render(
            &mut display,
            loaded(vec![record(json!({"title": "No poster"}))]),
            Some(&source),
        );
        assert_eq!(display.cards()[0].poster, PosterSlot::Missing);
        assert_eq!(display.cards()[0].poster_url, None);
    }

    #[test]
    fn poster_is_fetched_once_per_record_with_path() {
        let mut source = MockPosterSource::new();
        source
            .expect_url_for()
            .returning(|p| format!("http://img.local{p}"));
        source
            .expect_fetch()
            .with(eq("/a.png"))
            .times(1)
            .returning(|_| Ok(png(4, 4, [0, 0, 0, 255])));

        let mut display = Display::new();
        render(
            &mut display,
            loaded(vec![
                record(json!({"title": "A", "poster_path": "/a.png"})),
                record(json!({"title": "B"})),
            ]),
            Some(&source),
        );
        let cards = display.cards();
        let img = cards[0].poster.image().unwrap();
        assert_eq!((img.width(), img.height()), (120, 180));
        assert_eq!(cards[0].poster_url.as_deref(), Some("http://img.local/a.png"));
        assert_eq!(cards[1].poster, PosterSlot::Missing);
    }

    #[test]
    fn poster_failure_is_isolated_to_its_card() {
        let mut source = MockPosterSource::new();
        source
            .expect_url_for()
            .returning(|p| format!("http://img.local{p}"));
        source.expect_fetch().with(eq("/bad.jpg")).returning(|p| {
            Err(PosterError::Fetch {
                url: p.to_string(),
                detail: "404".into(),
            })
        });
        source
            .expect_fetch()
            .with(eq("/junk.jpg"))
            .returning(|_| Ok(b"not an image".to_vec()));
        source
            .expect_fetch()
            .with(eq("/good.png"))
            .returning(|_| Ok(png(2, 2, [9, 9, 9, 255])));

        let mut display = Display::new();
        render(
            &mut display,
            loaded(vec![
                record(json!({"title": "Bad", "poster_path": "/bad.jpg"})),
                record(json!({"title": "Junk", "poster_path": "/junk.jpg"})),
                record(json!({"title": "Good", "poster_path": "/good.png"})),
            ]),
            Some(&source),
        );
        let cards = display.cards();
        assert_eq!(cards.len(), 3);
        assert!(matches!(cards[0].poster, PosterSlot::Unavailable { .. }));
        assert!(matches!(cards[1].poster, PosterSlot::Unavailable { .. }));
        assert!(cards[2].has_image());
        assert!(display.notice().is_none());
    }

    #[test]
    fn without_source_posters_are_deferred() {
        let mut display = Display::new();
        render(
            &mut display,
            loaded(vec![record(json!({"title": "A", "poster_path": "/a.jpg"}))]),
            None,
        );
        assert_eq!(
            display.cards()[0].poster,
            PosterSlot::Deferred { path: "/a.jpg".into() }
        );
        assert_eq!(display.cards()[0].poster.deferred_path(), Some("/a.jpg"));
    }

    #[test]
    fn inception_card() {
        let source = source_ok();
        let mut display = Display::new();
        render(
            &mut display,
            loaded(vec![record(json!({
                "title": "Inception",
                "release_date": "2010-07-15",
                "vote_average": 8.4,
                "overview": "Dreams within dreams.",
                "poster_path": "/abc.jpg"
            }))]),
            Some(&source),
        );
        let card = &display.cards()[0];
        assert_eq!(card.title, "Inception");
        assert_eq!(card.meta_line, "2010   \u{2B50} 8.4/10");
        assert_eq!(card.overview, "Dreams within dreams.");
        assert!(card.has_image());
    }

    #[test]
    fn repeated_search_is_idempotent_and_does_not_leak_posters() {
        let source = source_ok();
        let records = vec![
            record(json!({"title": "A", "poster_path": "/a.jpg"})),
            record(json!({"title": "B", "poster_path": "/b.jpg"})),
            record(json!({"title": "C"})),
        ];

        let mut display = Display::new();
        render(&mut display, loaded(records.clone()), Some(&source));
        let first = display.cards().to_vec();
        let first_count = display.poster_count();

        render(&mut display, loaded(records), Some(&source));
        assert_eq!(display.cards(), first.as_slice());
        assert_eq!(display.poster_count(), first_count);
        assert_eq!(first_count, 2);
    }

    #[test]
    fn dismissing_notice_keeps_content() {
        let mut display = Display::new();
        render(&mut display, loaded(vec![]), None);
        render(&mut display, SearchOutcome::EmptyInput, None);
        display.dismiss_notice();
        assert!(display.notice().is_none());
        assert_eq!(display.content(), &Content::NoResults);
    }

    #[test]
    fn take_cards_empties_display() {
        let mut display = Display::new();
        render(&mut display, loaded(vec![record(json!({"title": "A"}))]), None);
        let cards = display.take_cards();
        assert_eq!(cards.len(), 1);
        assert!(display.cards().is_empty());

        render(&mut display, loaded(vec![]), None);
        assert!(display.take_cards().is_empty());
        assert_eq!(display.content(), &Content::NoResults);
    }

    #[test]
    fn prepare_then_apply_matches_render() {
        let records = vec![
            record(json!({"title": "A", "release_date": "1979-05-25"})),
            record(json!({"title": "B"})),
        ];
        let mut direct = Display::new();
        render(&mut direct, loaded(records.clone()), None);

        let prepared = prepare(loaded(records), None);
        let mut split = Display::new();
        apply(&mut split, prepared);
        assert_eq!(direct, split);
        assert_eq!(split.result_count, 2);
    }
}
