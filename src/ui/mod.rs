//! UI rendering module for sheetpick
//!
//! This module contains all the rendering logic for the terminal user interface,
//! using the ratatui library for TUI components.

pub mod error_view;
pub mod help_overlay;
pub mod loading;
pub mod sheet_table;

pub use error_view::render as render_error;
pub use help_overlay::render as render_help_overlay;
pub use loading::render as render_loading;
pub use sheet_table::render as render_sheet_table;

use ratatui::Frame;

use crate::app::{App, AppState};

/// Renders the UI based on the current application state
pub fn render(frame: &mut Frame, app: &App) {
    match &app.state {
        AppState::Loading => render_loading(frame, app),
        AppState::Table => render_sheet_table(frame, app),
        AppState::Failed(reason) => render_error(frame, reason),
    }

    if app.show_help {
        render_help_overlay(frame);
    }
}
