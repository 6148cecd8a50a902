//! Command-line interface parsing for sheetpick
//!
//! This module handles parsing of CLI arguments using clap: which sheet to
//! load, where to cache it, and whether to run the terminal UI or one of the
//! non-interactive `--html` / `--pick` modes.

use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

use crate::sheet::{SheetSource, DEFAULT_SHEET_ID, DEFAULT_SHEET_NAME};

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The sheet id is empty or whitespace
    #[error("Sheet id must not be empty")]
    EmptySheetId,
}

/// sheetpick - Browse a published spreadsheet and pick a random row
#[derive(Parser, Debug)]
#[command(name = "sheetpick")]
#[command(about = "Browse a published spreadsheet and pick a random row")]
#[command(version)]
pub struct Cli {
    /// Id of the published spreadsheet
    #[arg(long, value_name = "ID", default_value = DEFAULT_SHEET_ID)]
    pub sheet_id: String,

    /// Name of the sheet tab to load (empty loads the first tab)
    #[arg(long, value_name = "NAME", default_value = DEFAULT_SHEET_NAME)]
    pub sheet_name: String,

    /// Directory for the cached sheet (defaults to the user cache directory)
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Write the table as an HTML page to PATH and exit
    ///
    /// Examples:
    ///   sheetpick --html movies.html
    #[arg(long, value_name = "PATH", conflicts_with = "pick")]
    pub html: Option<PathBuf>,

    /// Print one random row and exit
    #[arg(long)]
    pub pick: bool,
}

/// How the binary should run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Interactive terminal UI
    #[default]
    Interactive,
    /// Write an HTML page and exit
    Html(PathBuf),
    /// Print a random pick and exit
    Pick,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// Sheet to load
    pub source: SheetSource,
    /// Cache directory override
    pub cache_dir: Option<PathBuf>,
    /// Interactive or one-shot mode
    pub mode: RunMode,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if the sheet id is empty
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let sheet_id = cli.sheet_id.trim();
        if sheet_id.is_empty() {
            return Err(CliError::EmptySheetId);
        }

        let mode = match (&cli.html, cli.pick) {
            (Some(path), _) => RunMode::Html(path.clone()),
            (None, true) => RunMode::Pick,
            (None, false) => RunMode::Interactive,
        };

        Ok(StartupConfig {
            source: SheetSource::new(sheet_id, cli.sheet_name.clone()),
            cache_dir: cli.cache_dir.clone(),
            mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args_uses_defaults() {
        let cli = Cli::parse_from(["sheetpick"]);
        assert_eq!(cli.sheet_id, DEFAULT_SHEET_ID);
        assert_eq!(cli.sheet_name, DEFAULT_SHEET_NAME);
        assert!(cli.cache_dir.is_none());
        assert!(cli.html.is_none());
        assert!(!cli.pick);
    }

    #[test]
    fn test_cli_parse_sheet_options() {
        let cli = Cli::parse_from([
            "sheetpick",
            "--sheet-id",
            "abc",
            "--sheet-name",
            "Movies",
            "--cache-dir",
            "/tmp/sp",
        ]);
        assert_eq!(cli.sheet_id, "abc");
        assert_eq!(cli.sheet_name, "Movies");
        assert_eq!(cli.cache_dir, Some(PathBuf::from("/tmp/sp")));
    }

    #[test]
    fn test_cli_html_and_pick_conflict() {
        let result = Cli::try_parse_from(["sheetpick", "--html", "out.html", "--pick"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_startup_config_default() {
        let config = StartupConfig::default();
        assert_eq!(config.mode, RunMode::Interactive);
        assert_eq!(config.source, SheetSource::default());
        assert!(config.cache_dir.is_none());
    }

    #[test]
    fn test_startup_config_from_cli_interactive() {
        let cli = Cli::parse_from(["sheetpick"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.mode, RunMode::Interactive);
        assert_eq!(config.source, SheetSource::default());
    }

    #[test]
    fn test_startup_config_from_cli_html() {
        let cli = Cli::parse_from(["sheetpick", "--html", "out.html"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.mode, RunMode::Html(PathBuf::from("out.html")));
    }

    #[test]
    fn test_startup_config_from_cli_pick() {
        let cli = Cli::parse_from(["sheetpick", "--pick"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.mode, RunMode::Pick);
    }

    #[test]
    fn test_startup_config_empty_sheet_name_is_allowed() {
        let cli = Cli::parse_from(["sheetpick", "--sheet-name", ""]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.source.sheet_name, "");
    }

    #[test]
    fn test_startup_config_trims_sheet_id() {
        let cli = Cli::parse_from(["sheetpick", "--sheet-id", "  abc  "]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.source.sheet_id, "abc");
    }

    #[test]
    fn test_startup_config_rejects_empty_sheet_id() {
        let cli = Cli::parse_from(["sheetpick", "--sheet-id", "  "]);
        let result = StartupConfig::from_cli(&cli);
        assert!(matches!(result, Err(CliError::EmptySheetId)));
        assert!(result.unwrap_err().to_string().contains("Sheet id"));
    }
}
