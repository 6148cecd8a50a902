//! HTML rendering for the sheet table and the random pick
//!
//! Every remote-derived string goes through [`escape_html`], so cell values
//! are always text and never markup. The only element built from sheet data
//! is the Source link, and only after [`validate_link`] accepted the target.
//! [`terminal_text`] does the same job for plain terminal output.

use std::fmt::Write;

use crate::picker::{validate_link, Selection};
use crate::sheet::Dataset;

/// Escapes text for use in element content and quoted attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Makes text safe to print to a terminal
///
/// Control characters are dropped so escape sequences in cell text are shown
/// inert; line breaks and tabs become spaces.
pub fn terminal_text(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            c if c.is_control() && c.is_whitespace() => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Renders a pick as the three labeled lines printed by `--pick`
pub fn render_selection_text(selection: &Selection) -> String {
    format!(
        "Title:       {}\nDescription: {}\nSource:      {}\n",
        terminal_text(&selection.title),
        terminal_text(&selection.description),
        terminal_text(&selection.source)
    )
}

/// Renders a complete `<table>` element
///
/// One header row with a `<th>` per header, then one `<tr>` per data row
/// with a `<td>` per value, all in input order.
pub fn render_table_html(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut html = String::from("<table id=\"sheetTable\">\n<thead>\n<tr>");
    for header in headers {
        let _ = write!(html, "<th>{}</th>", escape_html(header));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in rows {
        html.push_str("<tr>");
        for value in row {
            let _ = write!(html, "<td>{}</td>", escape_html(value));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>");
    html
}

fn cell_box(label: &str, value_html: &str) -> String {
    format!(
        "<div class=\"cell-box\"><div class=\"cell-label\">{}</div><div class=\"cell-value\">{}</div></div>",
        label, value_html
    )
}

/// Renders the Title / Description / Source boxes for a pick
///
/// The source becomes a link opening in a new tab when it is a valid http(s)
/// URL; otherwise it is shown as plain text.
pub fn render_selection_html(selection: &Selection) -> String {
    let source_html = match validate_link(&selection.source) {
        Some(url) => format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            escape_html(url.as_str()),
            escape_html(&selection.source)
        ),
        None => escape_html(&selection.source),
    };

    [
        cell_box("Title", &escape_html(&selection.title)),
        cell_box("Description", &escape_html(&selection.description)),
        cell_box("Source", &source_html),
    ]
    .join("\n")
}

const PAGE_STYLE: &str = "body{font-family:sans-serif;margin:2rem}\
table{border-collapse:collapse}th,td{border:1px solid #ccc;padding:4px 8px;text-align:left}\
th{background:#f0f0f0}.cell-box{margin:.5rem 0}.cell-label{font-weight:bold}";

/// Renders a standalone page with the optional pick above the table
pub fn render_page(title: &str, dataset: &Dataset, selection: Option<&Selection>) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n",
        escape_html(title),
        PAGE_STYLE
    );

    if let Some(selection) = selection {
        let _ = write!(
            html,
            "<div id=\"randomContent\">\n{}\n</div>\n",
            render_selection_html(selection)
        );
    }

    html.push_str(&render_table_html(&dataset.headers, &dataset.rows));
    html.push_str("\n</body>\n</html>\n");
    html
}
