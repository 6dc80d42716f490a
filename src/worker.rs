//! Background search runner shared by the GUI and TUI
//!
//! Each search runs on its own thread and reports back over a channel that
//! the UI loop polls. Searches are numbered; a result whose generation is no
//! longer the latest is dropped, so a newer search always wins.

use crate::model::SearchQuery;
use crate::poster::PosterSource;
use crate::query::{MovieSearch, SearchOutcome};
use crate::render::{prepare, Prepared};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;

/// Message from a search thread
pub struct SearchMessage {
    pub generation: u64,
    pub prepared: Prepared,
}

pub type SharedSearch = Arc<dyn MovieSearch + Send + Sync>;
pub type SharedPosters = Arc<dyn PosterSource + Send + Sync>;

pub struct SearchRunner {
    service: SharedSearch,
    posters: Option<SharedPosters>,
    sender: Sender<SearchMessage>,
    receiver: Receiver<SearchMessage>,
    /// Generation of the most recently started search
    generation: u64,
    /// Generation still waiting for its result
    pending: Option<u64>,
}

impl SearchRunner {
    pub fn new(service: SharedSearch, posters: Option<SharedPosters>) -> Self {
        let (sender, receiver) = channel();
        Self {
            service,
            posters,
            sender,
            receiver,
            generation: 0,
            pending: None,
        }
    }

    /// Whether a search is in flight
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a search, superseding any search still in flight
    pub fn start(&mut self, query: SearchQuery) -> u64 {
        self.generation += 1;
        let generation = self.generation;
        self.pending = Some(generation);

        let service = Arc::clone(&self.service);
        let posters = self.posters.clone();
        let tx = self.sender.clone();

        thread::spawn(move || {
            let outcome = match service.search(&query) {
                Ok(results) => SearchOutcome::Loaded(results),
                Err(e) => SearchOutcome::Failed(e),
            };
            let posters = posters.as_deref().map(|p| p as &dyn PosterSource);
            let prepared = prepare(outcome, posters);
            let _ = tx.send(SearchMessage {
                generation,
                prepared,
            });
        });

        tracing::debug!(generation, "search started");
        generation
    }

    /// Collect the result of the latest search, if it has arrived
    pub fn poll(&mut self) -> Option<Prepared> {
        let mut latest = None;
        while let Ok(msg) = self.receiver.try_recv() {
            if Some(msg.generation) == self.pending {
                self.pending = None;
                latest = Some(msg.prepared);
            } else {
                tracing::debug!(generation = msg.generation, "dropping superseded search result");
            }
        }
        latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;
    use crate::model::{MovieRecord, ResultSet};
    use crate::poster::{test_images, MockPosterSource};
    use crate::render::PosterSlot;
    use serde_json::json;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    /// Answers with one record titled after the query (poster `/<query>.png`),
    /// after an optional delay
    struct EchoSearch {
        delays: Mutex<Vec<Duration>>,
    }

    impl MovieSearch for EchoSearch {
        fn search(&self, query: &SearchQuery) -> Result<ResultSet, QueryError> {
            let delay = self.delays.lock().unwrap().pop().unwrap_or_default();
            thread::sleep(delay);
            if query.as_str() == "offline" {
                return Err(QueryError::connection_failed("refused"));
            }
            Ok(ResultSet::new(vec![MovieRecord::from_json(
                &json!({ "title": query.as_str(), "poster_path": format!("/{}.png", query) }),
            )]))
        }
    }

    fn wait_for(runner: &mut SearchRunner) -> Prepared {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(prepared) = runner.poll() {
                return prepared;
            }
            assert!(Instant::now() < deadline, "search did not finish");
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn titles(prepared: &Prepared) -> Vec<String> {
        match prepared {
            Prepared::Loaded { cards, .. } => cards.iter().map(|c| c.title.clone()).collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn delivers_result_and_goes_idle() {
        let service = Arc::new(EchoSearch {
            delays: Mutex::new(Vec::new()),
        });
        let mut runner = SearchRunner::new(service, None);
        assert!(!runner.is_busy());

        runner.start(SearchQuery::parse("Alien").unwrap());
        assert!(runner.is_busy());
        let prepared = wait_for(&mut runner);
        assert_eq!(titles(&prepared), ["Alien"]);
        assert!(!runner.is_busy());
    }

    #[test]
    fn failures_are_delivered() {
        let service = Arc::new(EchoSearch {
            delays: Mutex::new(Vec::new()),
        });
        let mut runner = SearchRunner::new(service, None);
        runner.start(SearchQuery::parse("offline").unwrap());
        assert!(matches!(
            wait_for(&mut runner),
            Prepared::Failed(QueryError::ConnectionFailed { .. })
        ));
    }

    #[test]
    fn newer_search_supersedes_older() {
        // Delays are popped from the back: the first search sleeps longest.
        let service = Arc::new(EchoSearch {
            delays: Mutex::new(vec![Duration::ZERO, Duration::from_millis(200)]),
        });
        let mut runner = SearchRunner::new(service, None);
        let first = runner.start(SearchQuery::parse("slow").unwrap());
        let second = runner.start(SearchQuery::parse("fast").unwrap());
        assert!(second > first);

        let prepared = wait_for(&mut runner);
        assert_eq!(titles(&prepared), ["fast"]);

        // The slow result arrives later and is discarded.
        thread::sleep(Duration::from_millis(300));
        assert!(runner.poll().is_none());
    }

    #[test]
    fn posters_travel_with_the_latest_result_only() {
        let service = Arc::new(EchoSearch {
            delays: Mutex::new(vec![Duration::ZERO, Duration::from_millis(200)]),
        });
        let mut posters = MockPosterSource::new();
        posters
            .expect_url_for()
            .returning(|path| format!("http://images.test{}", path));
        posters
            .expect_fetch()
            .returning(|_| Ok(test_images::png(60, 90, [10, 20, 30, 255])));
        let mut runner = SearchRunner::new(service, Some(Arc::new(posters)));

        runner.start(SearchQuery::parse("slow").unwrap());
        runner.start(SearchQuery::parse("fast").unwrap());

        match wait_for(&mut runner) {
            Prepared::Loaded { cards, .. } => {
                assert_eq!(cards.len(), 1);
                assert_eq!(cards[0].title, "fast");
                assert_eq!(cards[0].poster_url.as_deref(), Some("http://images.test/fast.png"));
                assert!(matches!(cards[0].poster, PosterSlot::Image(_)));
            }
            other => panic!("expected loaded cards, got {other:?}"),
        }

        // The slow search also decodes its poster, but its cards never surface.
        thread::sleep(Duration::from_millis(300));
        assert!(runner.poll().is_none());
        assert!(!runner.is_busy());
    }
}
