//! sheetpick library
//!
//! Exposes the loading, caching, rendering and picking modules so the binary
//! and the integration tests share one implementation.

pub mod app;
pub mod cache;
pub mod cli;
pub mod loader;
pub mod picker;
pub mod render;
pub mod sheet;
pub mod ui;
