//! sheetpick - Browse a published spreadsheet and pick a random row
//!
//! A terminal UI application that loads a published sheet (from the local
//! cache when possible), shows it as a table and picks random rows from it.
//! `--html` and `--pick` run the same load without the terminal UI.

use std::fs::{self, OpenOptions};
use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use sheetpick::app::App;
use sheetpick::cache::CacheStore;
use sheetpick::cli::{Cli, RunMode, StartupConfig};
use sheetpick::loader::{self, load_dataset, LoadConfig, LoadHandle, LoadedDataset};
use sheetpick::picker;
use sheetpick::render;
use sheetpick::sheet::SheetClient;
use sheetpick::ui;

/// Log file written in interactive mode, inside the cache directory
const LOG_FILE_NAME: &str = "sheetpick.log";

/// Sets up logging to stderr, or to a file when the terminal UI owns the screen.
///
/// If the log file cannot be opened in interactive mode, logging stays off.
fn init_logging(log_file: Option<PathBuf>) {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env)
                .with_writer(io::stderr)
                .init();
        }
        Some(path) => {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            if let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) {
                tracing_subscriber::fmt()
                    .with_env_filter(env)
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .init();
            }
        }
    }
}

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Resolves the cache directory from the override or the XDG default
fn cache_dir(config: &StartupConfig) -> Option<PathBuf> {
    config.cache_dir.clone().or_else(CacheStore::default_dir)
}

/// Loads the sheet inline for the non-interactive modes
async fn load_once(config: &StartupConfig) -> Result<LoadedDataset, Box<dyn std::error::Error>> {
    let cache = cache_dir(config).map(|dir| CacheStore::with_dir(dir, &config.source));
    let client = SheetClient::new();

    load_dataset(cache.as_ref(), &client, &config.source, |p| {
        debug!(progress = p, "loading sheet")
    })
    .await
    .map_err(|e| {
        error!(error = %e, "sheet load failed");
        e.into()
    })
}

/// Runs the terminal UI until the user quits
async fn run_interactive(config: StartupConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new().with_title(config.source.sheet_name.clone());

    // Start the load in the background so progress can be drawn
    let mut handle = LoadHandle::spawn(LoadConfig {
        cache: cache_dir(&config).map(|dir| CacheStore::with_dir(dir, &config.source)),
        source: config.source,
        client: SheetClient::new(),
    });

    // Main event loop
    loop {
        while let Some(message) = loader::try_recv(&mut handle) {
            app.handle_load_message(message, Instant::now());
        }
        app.tick(Instant::now());

        // Render UI
        terminal.draw(|f| ui::render(f, &app))?;

        if let Some(link) = app.link_to_open.take() {
            info!(%link, "opening link");
            if let Err(e) = open::that(link.as_str()) {
                warn!(error = %e, "failed to open link");
            }
        }

        // Poll for keyboard events with 50ms timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = StartupConfig::from_cli(&cli)?;

    match config.mode.clone() {
        RunMode::Interactive => {
            init_logging(cache_dir(&config).map(|dir| dir.join(LOG_FILE_NAME)));
            info!(sheet_id = %config.source.sheet_id, "starting");
            run_interactive(config).await
        }
        RunMode::Html(path) => {
            init_logging(None);
            let loaded = load_once(&config).await?;
            let selection = picker::pick_random(&loaded.dataset.rows);
            let page = render::render_page(
                &config.source.sheet_name,
                &loaded.dataset,
                selection.as_ref(),
            );
            fs::write(&path, page)?;
            info!(
                rows = loaded.dataset.row_count(),
                path = %path.display(),
                "wrote HTML page"
            );
            Ok(())
        }
        RunMode::Pick => {
            init_logging(None);
            let loaded = load_once(&config).await?;
            match picker::pick_random(&loaded.dataset.rows) {
                Some(selection) => print!("{}", render::render_selection_text(&selection)),
                None => println!("No rows to pick from"),
            }
            Ok(())
        }
    }
}
