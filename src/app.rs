//! Application state management for sheetpick
//!
//! This module contains the main application state, handling keyboard input,
//! load progress, and state transitions between the loading, table and error views.

use crossterm::event::{KeyCode, KeyEvent};
use std::time::{Duration, Instant};
use url::Url;

use crate::loader::{LoadMessage, PROGRESS_DONE};
use crate::picker::{pick_random, Selection};
use crate::sheet::{DataOrigin, SheetData};

/// How long the finished progress bar stays visible after a network load
pub const LOADING_HIDE_DELAY: Duration = Duration::from_millis(300);

/// Application state enum representing the current view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppState {
    /// Initial loading state while reading the cache or fetching the sheet
    Loading,
    /// Table view with the random pick panel
    Table,
    /// The sheet could not be loaded
    Failed(String),
}

/// Main application struct managing state and data
pub struct App {
    /// Current application state/view
    pub state: AppState,
    /// Load progress percentage shown on the loading screen
    pub progress: u8,
    /// Loaded sheet; set once and never modified
    pub data: Option<SheetData>,
    /// Most recent random pick
    pub selection: Option<Selection>,
    /// Index of the first table row on screen
    pub scroll_offset: usize,
    /// Title shown above the table
    pub title: String,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Link the main loop should open in the browser
    pub link_to_open: Option<Url>,
    /// When to leave the loading screen after a network load
    ready_at: Option<Instant>,
}

impl App {
    /// Creates a new App instance in the loading state
    pub fn new() -> Self {
        Self {
            state: AppState::Loading,
            progress: 0,
            data: None,
            selection: None,
            scroll_offset: 0,
            title: String::new(),
            show_help: false,
            should_quit: false,
            link_to_open: None,
            ready_at: None,
        }
    }

    /// Sets the title shown above the table
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Returns the number of loaded rows
    pub fn row_count(&self) -> usize {
        self.data.as_ref().map_or(0, |d| d.rows().len())
    }

    /// Applies a message from the background load
    ///
    /// # Behavior
    /// - `Progress` raises the progress bar (it never moves backwards)
    /// - `Loaded` from the cache shows the table immediately
    /// - `Loaded` from the network completes the bar and shows the table
    ///   after [`LOADING_HIDE_DELAY`] (see [`App::tick`])
    /// - `Failed` switches to the error view
    pub fn handle_load_message(&mut self, message: LoadMessage, now: Instant) {
        match message {
            LoadMessage::Progress(p) => {
                self.progress = self.progress.max(p.min(PROGRESS_DONE));
            }
            LoadMessage::Loaded(loaded) => {
                let origin = loaded.origin;
                self.data = Some(loaded.into());
                self.scroll_offset = 0;
                match origin {
                    DataOrigin::Cache => {
                        self.progress = PROGRESS_DONE;
                        self.state = AppState::Table;
                    }
                    DataOrigin::Network => {
                        self.progress = PROGRESS_DONE;
                        self.ready_at = Some(now + LOADING_HIDE_DELAY);
                    }
                }
            }
            LoadMessage::Failed(reason) => {
                self.ready_at = None;
                self.state = AppState::Failed(reason);
            }
        }
    }

    /// Advances time-based transitions
    pub fn tick(&mut self, now: Instant) {
        if let Some(ready_at) = self.ready_at {
            if now >= ready_at && self.state == AppState::Loading {
                self.ready_at = None;
                self.state = AppState::Table;
            }
        }
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `q`: Quit the application (any view)
    /// - `Esc`: Close help, otherwise quit
    /// - `r`/`Space`: Pick a random row (table view)
    /// - `o`: Open the picked Source link if it is a valid URL
    /// - `Up`/`k`, `Down`/`j`: Scroll the table
    /// - `g`/`G`: Jump to first/last row
    /// - `?`: Toggle help overlay
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        match self.state {
            AppState::Loading | AppState::Failed(_) => {
                if matches!(key_event.code, KeyCode::Char('q') | KeyCode::Esc) {
                    self.should_quit = true;
                }
            }
            AppState::Table => match key_event.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Char('r') | KeyCode::Char(' ') => {
                    self.pick_random();
                }
                KeyCode::Char('o') => {
                    self.link_to_open = self.selection.as_ref().and_then(Selection::link);
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.scroll_up();
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.scroll_down();
                }
                KeyCode::Char('g') => {
                    self.scroll_offset = 0;
                }
                KeyCode::Char('G') => {
                    self.scroll_offset = self.row_count().saturating_sub(1);
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
        }
    }

    /// Picks a random row into `selection`
    ///
    /// Leaves the current selection untouched when there are no rows.
    pub fn pick_random(&mut self) {
        let Some(ref data) = self.data else {
            return;
        };
        if let Some(selection) = pick_random(data.rows()) {
            self.selection = Some(selection);
        }
    }

    /// Scrolls up one row, stopping at the first
    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Scrolls down one row, stopping at the last
    pub fn scroll_down(&mut self) {
        if self.scroll_offset + 1 < self.row_count() {
            self.scroll_offset += 1;
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
