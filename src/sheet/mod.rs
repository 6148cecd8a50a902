//! Core data model for a published spreadsheet
//!
//! This module contains the dataset types shared by the cache, the fetcher,
//! the renderers and the random picker, plus the client used to download a
//! sheet from the visualization-query endpoint.

pub mod client;
pub mod gviz;

pub use client::{FetchError, SheetClient};

use serde::{Deserialize, Serialize};

/// Sheet id of the spreadsheet shown when no `--sheet-id` is given
pub const DEFAULT_SHEET_ID: &str = "1MqRSj_s91_i1is965PLkFtHD6QEym8SS3Z6I5PPNzfU";

/// Sheet (tab) name used when no `--sheet-name` is given
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Identifies which spreadsheet and tab to load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSource {
    /// Spreadsheet document id (the long token in the sheet URL)
    pub sheet_id: String,
    /// Name of the tab to query; empty means the first tab
    pub sheet_name: String,
}

impl SheetSource {
    pub fn new(sheet_id: impl Into<String>, sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_id: sheet_id.into(),
            sheet_name: sheet_name.into(),
        }
    }
}

impl Default for SheetSource {
    fn default() -> Self {
        Self::new(DEFAULT_SHEET_ID, DEFAULT_SHEET_NAME)
    }
}

/// Parsed table contents: column labels plus string cells
///
/// A dataset is consistent when every row has exactly one cell per header.
/// Datasets produced by the parser are always consistent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Column labels, in display order
    pub headers: Vec<String>,
    /// Rows of cell values, each the same length as `headers`
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Returns true when every row has one cell per header
    pub fn is_consistent(&self) -> bool {
        let width = self.headers.len();
        self.rows.iter().all(|row| row.len() == width)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Where a loaded dataset came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    /// Read from the local cache without touching the network
    Cache,
    /// Downloaded from the spreadsheet endpoint
    Network,
}

/// Application-held copy of the loaded sheet
///
/// Built once per load and never mutated afterwards; the table view and the
/// random picker only ever borrow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetData {
    dataset: Dataset,
    origin: DataOrigin,
}

impl SheetData {
    pub fn new(dataset: Dataset, origin: DataOrigin) -> Self {
        Self { dataset, origin }
    }

    pub fn headers(&self) -> &[String] {
        &self.dataset.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.dataset.rows
    }

    pub fn origin(&self) -> DataOrigin {
        self.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_dataset() -> Dataset {
        Dataset::new(
            vec!["Title".to_string(), "Desc".to_string(), "Link".to_string()],
            vec![
                vec!["A".to_string(), "d1".to_string(), "http://x".to_string()],
                vec!["B".to_string(), "d2".to_string(), "http://y".to_string()],
            ],
        )
    }

    #[test]
    fn test_dataset_consistent_when_rows_match_headers() {
        assert!(sample_dataset().is_consistent());
    }

    #[test]
    fn test_dataset_inconsistent_when_row_is_short() {
        let mut dataset = sample_dataset();
        dataset.rows[1].pop();
        assert!(!dataset.is_consistent());
    }

    #[test]
    fn test_empty_dataset_is_consistent() {
        let dataset = Dataset::new(vec!["Only".to_string()], Vec::new());
        assert!(dataset.is_consistent());
        assert_eq!(dataset.row_count(), 0);
    }

    #[test]
    fn test_dataset_serialization_roundtrip() {
        let dataset = sample_dataset();
        let json = serde_json::to_string(&dataset).expect("Failed to serialize Dataset");
        assert!(json.contains("\"headers\""));
        assert!(json.contains("\"rows\""));

        let deserialized: Dataset =
            serde_json::from_str(&json).expect("Failed to deserialize Dataset");
        assert_eq!(deserialized, dataset);
    }

    #[test]
    fn test_default_source_points_at_published_sheet() {
        let source = SheetSource::default();
        assert_eq!(source.sheet_id, DEFAULT_SHEET_ID);
        assert_eq!(source.sheet_name, "Sheet1");
    }

    #[test]
    fn test_sheet_data_exposes_dataset() {
        let data = SheetData::new(sample_dataset(), DataOrigin::Cache);
        assert_eq!(data.headers().len(), 3);
        assert_eq!(data.rows().len(), 2);
        assert_eq!(data.origin(), DataOrigin::Cache);
        assert_eq!(data.rows(), sample_dataset().rows.as_slice());
    }
}
