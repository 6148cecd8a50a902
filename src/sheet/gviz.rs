//! Parsing for visualization-query responses
//!
//! The endpoint answers with JavaScript rather than JSON:
//!
//! ```text
//! /*O_o*/
//! google.visualization.Query.setResponse({"version":"0.6","status":"ok","table":{...}});
//! ```
//!
//! [`extract_envelope`] isolates the JSON argument of the callback and
//! [`parse_response`] turns it into a [`Dataset`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use super::{Dataset, FetchError};

/// Matches the callback wrapper; the single group is the inner JSON text
static ENVELOPE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)google\.visualization\.Query\.setResponse\((.*)\);?")
        .expect("envelope pattern is valid")
});

/// Top-level payload of a query response
#[derive(Debug, Deserialize)]
struct GvizResponse {
    /// "ok", "warning" or "error"
    #[serde(default)]
    status: Option<String>,
    /// Problems reported when `status` is "error"
    #[serde(default)]
    errors: Vec<GvizMessage>,
    /// The queried table; absent on error responses
    #[serde(default)]
    table: Option<GvizTable>,
}

#[derive(Debug, Deserialize)]
struct GvizMessage {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detailed_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GvizTable {
    #[serde(default)]
    cols: Vec<GvizColumn>,
    #[serde(default)]
    rows: Vec<GvizRow>,
}

#[derive(Debug, Deserialize)]
struct GvizColumn {
    /// Usually a string; other scalars are shown as text
    #[serde(default)]
    label: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct GvizRow {
    /// Cells in column order; entries may be `null` or missing at the tail
    #[serde(default)]
    c: Vec<Option<GvizCell>>,
}

#[derive(Debug, Deserialize)]
struct GvizCell {
    /// Raw value (string, number, boolean or null)
    #[serde(default)]
    v: Option<Value>,
    /// Formatted value as displayed in the sheet
    #[serde(default)]
    f: Option<Value>,
}

impl GvizCell {
    /// Display text for the cell: formatted value, then raw value, then empty
    fn display_value(&self) -> String {
        self.f
            .as_ref()
            .or(self.v.as_ref())
            .map(value_text)
            .unwrap_or_default()
    }
}

/// Text form of a JSON scalar as a browser would show it
///
/// Numbers use the shortest form without a trailing `.0`, so `1999.0` reads
/// as `1999`.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                match n.as_f64() {
                    Some(f) if f == 0.0 => "0".to_string(),
                    Some(f) => f.to_string(),
                    None => n.to_string(),
                }
            }
        }
        other => other.to_string(),
    }
}

/// Returns the JSON text wrapped by the `setResponse(...)` callback
///
/// # Returns
/// * `Ok(&str)` - exactly the text between the call's parentheses
/// * `Err(FetchError::MalformedEnvelope)` - if the callback syntax is not found
pub fn extract_envelope(text: &str) -> Result<&str, FetchError> {
    ENVELOPE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or(FetchError::MalformedEnvelope)
}

/// Parses the inner JSON of a query response into a dataset
///
/// Rows are built by walking the declared columns, so every row has exactly
/// one cell per header even when the response omits trailing cells.
pub fn parse_table(json: &str) -> Result<Dataset, FetchError> {
    let response: GvizResponse = serde_json::from_str(json)?;

    if response.status.as_deref() == Some("error") {
        let message = response
            .errors
            .iter()
            .filter_map(|e| e.detailed_message.as_deref().or(e.message.as_deref()))
            .collect::<Vec<_>>()
            .join("; ");
        return Err(FetchError::QueryFailed(message));
    }

    let table = response.table.ok_or_else(|| {
        FetchError::InvalidJson(<serde_json::Error as serde::de::Error>::missing_field(
            "table",
        ))
    })?;

    let headers: Vec<String> = table
        .cols
        .iter()
        .map(|col| col.label.as_ref().map(value_text).unwrap_or_default())
        .collect();

    let rows = table
        .rows
        .iter()
        .map(|row| {
            (0..table.cols.len())
                .map(|i| match row.c.get(i) {
                    Some(Some(cell)) => cell.display_value(),
                    _ => String::new(),
                })
                .collect()
        })
        .collect();

    Ok(Dataset::new(headers, rows))
}

/// Extracts and parses a complete response body
pub fn parse_response(text: &str) -> Result<Dataset, FetchError> {
    parse_table(extract_envelope(text)?)
}
