use crate::model::SearchQuery;
use crate::render::{apply, Prepared};
use crate::tui::list::CardListState;
use crate::tui::search::SearchState;
use crate::tui::ui;
use crate::worker::SearchRunner;
use crate::Display;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};

pub struct App {
    // Sub-states
    pub search: SearchState,
    pub list: CardListState,

    // Search pipeline
    pub runner: SearchRunner,
    pub display: Display,
    /// Prefix for poster links shown on the cards
    pub image_base_url: String,

    pub status_message: String,

    // Quit flag
    pub should_quit: bool,
}

impl App {
    pub fn new(runner: SearchRunner, image_base_url: impl Into<String>) -> Self {
        Self {
            search: SearchState::default(),
            list: CardListState::default(),
            runner,
            display: Display::new(),
            image_base_url: image_base_url.into(),
            status_message: "Type a movie title and press Enter".to_string(),
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> crate::Result<()> {
        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.process_results();
                last_tick = Instant::now();
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    fn start_search(&mut self) {
        let query = match SearchQuery::parse(&self.search.query) {
            Ok(query) => query,
            Err(_) => {
                apply(&mut self.display, Prepared::EmptyInput);
                return;
            }
        };

        self.display.clear();
        self.list.reset(0);
        self.status_message = format!("Searching for \"{}\"...", query);
        self.runner.start(query);
    }

    /// Apply a finished search, if any
    pub fn process_results(&mut self) {
        let Some(prepared) = self.runner.poll() else {
            return;
        };
        self.show(prepared);
    }

    fn show(&mut self, prepared: Prepared) {
        apply(&mut self.display, prepared);
        let shown = self.display.cards().len();
        self.list.reset(shown);

        self.status_message = match (self.display.notice(), shown) {
            (Some(notice), _) => notice.message.clone(),
            (None, 0) => "No results".to_string(),
            (None, shown) => match self.display.total_results {
                Some(total) => format!("Showing {} of {} results", shown, total),
                None => format!("Showing {} results", shown),
            },
        };

        if shown > 0 {
            self.search.focused = false;
        }
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent) {
        // A notice blocks everything until dismissed
        if self.display.notice().is_some() {
            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.should_quit = true;
                }
                KeyCode::Enter | KeyCode::Esc => self.display.dismiss_notice(),
                _ => {}
            }
            return;
        }

        // Global keys
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Esc => {
                if self.search.focused && !self.search.query.is_empty() {
                    self.search.clear();
                } else if self.search.focused {
                    self.search.focused = false;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            KeyCode::Enter => {
                self.start_search();
                return;
            }
            _ => {}
        }

        if self.search.focused {
            self.handle_search_key(key);
        } else {
            self.handle_list_key(key);
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => self.search.insert(c),
            KeyCode::Backspace => self.search.backspace(),
            KeyCode::Delete => self.search.delete(),
            KeyCode::Left => self.search.move_left(),
            KeyCode::Right => self.search.move_right(),
            KeyCode::Home => self.search.home(),
            KeyCode::End => self.search.end(),
            KeyCode::Tab | KeyCode::Down => {
                self.search.focused = false;
            }
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        let total = self.display.cards().len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_prev(total),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_next(total),
            KeyCode::PageUp => self.list.page_up(total),
            KeyCode::PageDown => self.list.page_down(total),
            KeyCode::Home => self.list.select_first(total),
            KeyCode::End => self.list.select_last(total),

            KeyCode::Tab | KeyCode::Char('/') => {
                self.search.focused = true;
            }

            // Any other printable char focuses search and types it
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.focused = true;
                self.search.end();
                self.search.insert(c);
            }

            _ => {}
        }
    }
}
