//! Sheet table screen rendering
//!
//! Renders the loaded rows as a table with the column labels as the header
//! row, followed by the random pick panel and a key hint line.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::app::App;
use crate::picker::Selection;
use crate::sheet::DataOrigin;

/// Renders the table view
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Table
            Constraint::Length(6), // Random pick panel
            Constraint::Length(1), // Help line
        ])
        .split(area);

    render_table(frame, app, chunks[0]);
    render_pick_panel(frame, app, chunks[1]);
    render_help(frame, app, chunks[2]);
}

/// Renders the header row and the rows from `scroll_offset` onward
fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let title = if app.title.is_empty() {
        " Sheet ".to_string()
    } else {
        format!(" {} ", app.title)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(ref data) = app.data else {
        frame.render_widget(Paragraph::new("No data").block(block), area);
        return;
    };

    let column_count = data.headers().len().max(1) as u32;
    let widths: Vec<Constraint> = data
        .headers()
        .iter()
        .map(|_| Constraint::Ratio(1, column_count))
        .collect();

    let header = Row::new(data.headers().iter().map(|h| Cell::from(h.as_str()))).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows = data
        .rows()
        .iter()
        .skip(app.scroll_offset)
        .map(|row| Row::new(row.iter().map(|value| Cell::from(value.as_str()))));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);

    frame.render_widget(table, area);
}

/// Builds the Title / Description / Source lines for a pick
fn selection_lines(selection: &Selection) -> Vec<Line<'static>> {
    let label = |text: &str| {
        Span::styled(
            format!("{:<13}", text),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    };

    let source = match selection.link() {
        Some(_) => Line::from(vec![
            label("Source"),
            Span::styled(
                selection.source.clone(),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ),
            Span::styled("  (o to open)", Style::default().fg(Color::DarkGray)),
        ]),
        None => Line::from(vec![label("Source"), Span::raw(selection.source.clone())]),
    };

    vec![
        Line::from(vec![label("Title"), Span::raw(selection.title.clone())]),
        Line::from(vec![
            label("Description"),
            Span::raw(selection.description.clone()),
        ]),
        source,
    ]
}

/// Renders the random pick panel
fn render_pick_panel(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Random pick ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let lines = match app.selection {
        Some(ref selection) => selection_lines(selection),
        None if app.row_count() == 0 => vec![Line::from(Span::styled(
            "No rows to pick from",
            Style::default().fg(Color::DarkGray),
        ))],
        None => vec![Line::from(Span::styled(
            "Press r to pick a random row",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Renders the key hints with row count and data origin
fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let mut help_spans = vec![
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::raw(" Random  "),
        Span::styled("o", Style::default().fg(Color::Yellow)),
        Span::raw(" Open link  "),
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Scroll  "),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::raw(" Help  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit"),
    ];

    if let Some(ref data) = app.data {
        let origin = match data.origin() {
            DataOrigin::Cache => "cached",
            DataOrigin::Network => "fetched",
        };
        help_spans.push(Span::styled(
            format!(" │ {} rows, {}", data.rows().len(), origin),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph =
        Paragraph::new(Line::from(help_spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{LoadMessage, LoadedDataset};
    use crate::sheet::Dataset;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Instant;

    fn create_test_app(rows: Vec<Vec<&str>>) -> App {
        let dataset = Dataset::new(
            vec!["Title".to_string(), "Desc".to_string(), "Link".to_string()],
            rows.into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
        );
        let mut app = App::new().with_title("Sheet1");
        app.handle_load_message(
            LoadMessage::Loaded(LoadedDataset {
                dataset,
                origin: DataOrigin::Cache,
            }),
            Instant::now(),
        );
        app
    }

    fn buffer_text(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
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
    fn test_headers_and_rows_are_rendered() {
        let app = create_test_app(vec![
            vec!["Alien", "d1", "http://x"],
            vec!["Heat", "d2", "http://y"],
        ]);
        let content = buffer_text(&app);

        assert!(content.contains("Title"));
        assert!(content.contains("Desc"));
        assert!(content.contains("Link"));
        assert!(content.contains("Alien"));
        assert!(content.contains("Heat"));
        assert!(content.contains("Sheet1"));
    }

    #[test]
    fn test_scroll_offset_hides_earlier_rows() {
        let mut app = create_test_app(vec![
            vec!["Alien", "d1", "http://x"],
            vec!["Heat", "d2", "http://y"],
        ]);
        app.scroll_offset = 1;
        let content = buffer_text(&app);

        assert!(!content.contains("Alien"));
        assert!(content.contains("Heat"));
    }

    #[test]
    fn test_pick_prompt_before_selection() {
        let app = create_test_app(vec![vec!["Alien", "d1", "http://x"]]);
        assert!(buffer_text(&app).contains("Press r to pick a random row"));
    }

    #[test]
    fn test_empty_sheet_shows_no_rows_message() {
        let app = create_test_app(Vec::new());
        assert!(buffer_text(&app).contains("No rows to pick from"));
    }

    #[test]
    fn test_selection_fields_are_rendered() {
        let mut app = create_test_app(vec![vec!["Alien", "Space horror", "https://example.com"]]);
        app.pick_random();
        let content = buffer_text(&app);

        assert!(content.contains("Random pick"));
        assert!(content.contains("Description"));
        assert!(content.contains("Space horror"));
        assert!(content.contains("https://example.com"));
        assert!(content.contains("o to open"));
    }

    #[test]
    fn test_invalid_link_is_not_openable() {
        let mut app = create_test_app(vec![vec!["Alien", "d", "not a url"]]);
        app.pick_random();
        let content = buffer_text(&app);

        assert!(content.contains("not a url"));
        assert!(!content.contains("o to open"));
    }

    #[test]
    fn test_help_line_shows_origin() {
        let app = create_test_app(vec![vec!["Alien", "d1", "http://x"]]);
        let content = buffer_text(&app);
        assert!(content.contains("1 rows, cached"));
        assert!(content.contains("Quit"));
    }

    #[test]
    fn test_no_data_placeholder() {
        let app = App::new();
        assert!(buffer_text(&app).contains("No data"));
    }
}
