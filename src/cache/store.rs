//! Cache store for persisting a parsed sheet to disk
//!
//! Provides a `CacheStore` that writes a [`Dataset`] to a JSON file keyed by
//! the sheet it came from, and reads it back on the next start.

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::sheet::{Dataset, SheetSource};

/// Format version embedded in every cache key
///
/// Bumping it makes entries written by older builds unreachable, so a change
/// to the stored layout never has to read the old one.
pub const CACHE_FORMAT_VERSION: u32 = 1;

/// Errors that can occur when writing to the cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// Directory creation or file write failed
    #[error("Cache I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Dataset could not be serialized
    #[error("Failed to serialize cache entry: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// On-disk layout of a cache entry: the dataset fields plus a timestamp
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    #[serde(flatten)]
    data: T,
    /// When the entry was written
    cached_at: DateTime<Utc>,
}

/// Reads and writes the cached dataset for a sheet
///
/// Entries are stored as JSON files in an XDG-compliant cache directory
/// (`~/.cache/sheetpick/` on Linux). There is no expiry: once a sheet has been
/// cached it is served from disk until the file is removed.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
    /// Key for the sheet this store serves
    key: String,
}

impl CacheStore {
    /// Creates a new CacheStore with a custom cache directory
    pub fn with_dir(cache_dir: PathBuf, source: &SheetSource) -> Self {
        Self {
            cache_dir,
            key: Self::cache_key(source),
        }
    }

    /// Returns the default cache directory, if one can be determined
    pub fn default_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "sheetpick").map(|dirs| dirs.cache_dir().to_path_buf())
    }

    /// Generates the cache key for a sheet
    ///
    /// The key carries the format version, then the sheet id and tab name as
    /// lowercase hex of their UTF-8 bytes. Hex keeps ids that differ only in
    /// case or in `-`/`_` apart, even on case-insensitive filesystems, and the
    /// `_` separator can never occur inside an encoded part.
    pub fn cache_key(source: &SheetSource) -> String {
        format!(
            "sheet_v{}_{}_{}",
            CACHE_FORMAT_VERSION,
            hex(&source.sheet_id),
            hex(&source.sheet_name)
        )
    }

    /// Returns the path of the cache file
    pub fn path(&self) -> PathBuf {
        self.cache_dir.join(format!("{}.json", self.key))
    }

    /// Reads the cached dataset
    ///
    /// # Returns
    /// * `Some(Dataset)` if the entry exists, parses, and every row has one
    ///   cell per header
    /// * `None` otherwise; read and parse failures are logged, never returned
    pub fn get(&self) -> Option<Dataset> {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no cached sheet");
                return None;
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cache read failed");
                return None;
            }
        };

        let entry: CacheEntry<Dataset> = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cache entry is malformed");
                return None;
            }
        };

        let dataset = entry.data;
        if !dataset.is_consistent() {
            warn!(
                path = %path.display(),
                columns = dataset.headers.len(),
                "cached rows do not match header count"
            );
            return None;
        }

        info!(
            rows = dataset.row_count(),
            cached_at = %entry.cached_at,
            "loaded sheet from cache"
        );
        Some(dataset)
    }

    /// Writes the dataset, replacing any previous entry
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err(CacheError)` if directory creation, serialization or writing fails
    pub fn put(&self, dataset: &Dataset) -> Result<(), CacheError> {
        fs::create_dir_all(&self.cache_dir)?;

        let entry = CacheEntry {
            data: dataset,
            cached_at: Utc::now(),
        };
        let json = serde_json::to_string(&entry)?;

        fs::write(self.path(), json)?;
        info!(rows = dataset.row_count(), "saved sheet to cache");
        Ok(())
    }
}

/// Lowercase hex encoding of a string's bytes
fn hex(text: &str) -> String {
    text.bytes().map(|b| format!("{:02x}", b)).collect()
}
