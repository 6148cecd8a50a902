//! Visualization-query client for published spreadsheets
//!
//! Downloads a sheet as `tqx=out:json` and hands the callback-wrapped body to
//! the [`gviz`](super::gviz) parser.

use reqwest::Client;
use thiserror::Error;
use tracing::debug;
use url::Url;

use super::{gviz, Dataset, SheetSource};

/// Host serving the public query endpoint
const DEFAULT_BASE_URL: &str = "https://docs.google.com";

/// Output format requested from the endpoint
const OUTPUT_FORMAT: &str = "out:json";

/// Errors that can occur when fetching a sheet
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure or non-success HTTP status
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body is not wrapped in the expected callback
    #[error("Response is not a setResponse(...) callback")]
    MalformedEnvelope,

    /// Callback argument is not valid JSON for a query response
    #[error("Failed to parse response JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// Query URL could not be built from the base URL
    #[error("Invalid query URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The endpoint answered with an error status
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

/// Client for the spreadsheet visualization-query endpoint
#[derive(Debug, Clone)]
pub struct SheetClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Scheme and host of the endpoint (allows override for testing)
    base_url: String,
}

impl Default for SheetClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetClient {
    /// Creates a new SheetClient pointing at the public endpoint
    pub fn new() -> Self {
        Self {
            http_client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Creates a new SheetClient with a custom base URL
    ///
    /// Used by tests to point the client at a local server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Builds `{base}/spreadsheets/d/{id}/gviz/tq?tqx=out:json&sheet={name}`
    ///
    /// The `sheet` parameter is omitted when the sheet name is empty.
    pub fn query_url(&self, source: &SheetSource) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(["spreadsheets", "d", source.sheet_id.as_str(), "gviz", "tq"]);

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("tqx", OUTPUT_FORMAT);
            if !source.sheet_name.is_empty() {
                query.append_pair("sheet", &source.sheet_name);
            }
        }

        Ok(url)
    }

    /// Fetches and parses a sheet
    ///
    /// # Returns
    /// * `Ok(Dataset)` - headers and rows of the sheet
    /// * `Err(FetchError)` - if the request, envelope or JSON is bad
    pub async fn fetch(&self, source: &SheetSource) -> Result<Dataset, FetchError> {
        self.fetch_with_progress(source, |_| {}).await
    }

    /// Fetches a sheet, reporting 50 once the response arrives and 75 once
    /// the body has been read
    pub async fn fetch_with_progress(
        &self,
        source: &SheetSource,
        mut progress: impl FnMut(u8),
    ) -> Result<Dataset, FetchError> {
        let url = self.query_url(source)?;
        debug!(%url, "requesting sheet");

        let response = self
            .http_client
            .get(url)
            .send()
            .await?
            .error_for_status()?;
        progress(50);

        let text = response.text().await?;
        progress(75);
        debug!(bytes = text.len(), "received sheet response");

        gviz::parse_response(&text)
    }
}
