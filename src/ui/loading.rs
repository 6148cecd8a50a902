//! Loading screen with a progress gauge

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::app::App;

/// Renders a loading message and progress bar while the sheet is fetched
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Center the gauge vertically
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Percentage(40),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(chunks[2]);

    let loading_text = Paragraph::new("Loading sheet...")
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);
    frame.render_widget(loading_text, chunks[1]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(u16::from(app.progress.min(100)));
    frame.render_widget(gauge, horizontal[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(app: &App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_loading_message_is_rendered() {
        let app = App::new();
        assert!(buffer_text(&app).contains("Loading sheet..."));
    }

    #[test]
    fn test_gauge_shows_progress_percentage() {
        let mut app = App::new();
        app.progress = 75;
        assert!(buffer_text(&app).contains("75%"));
    }
}
