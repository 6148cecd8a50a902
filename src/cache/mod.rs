//! Cache module for persisting the loaded sheet to disk
//!
//! This module provides a cache store that keeps one parsed dataset per sheet
//! as a JSON file. Reads never fail: anything unreadable, malformed or
//! inconsistent is logged and treated as a cache miss.

mod store;

pub use store::{CacheError, CacheStore, CACHE_FORMAT_VERSION};
