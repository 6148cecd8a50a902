//! Cache-then-fetch load sequence
//!
//! Tries the local cache first and only goes to the network on a miss. A
//! network load reports progress milestones and persists the result. The
//! sequence can run inline ([`load_dataset`]) or on a background task that
//! streams [`LoadMessage`]s to the UI loop ([`LoadHandle`]).

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::cache::CacheStore;
use crate::sheet::{DataOrigin, Dataset, FetchError, SheetClient, SheetData, SheetSource};

/// Progress reported before the request is sent
pub const PROGRESS_FETCH_STARTED: u8 = 10;
/// Progress reported once the response has been parsed
pub const PROGRESS_PARSED: u8 = 90;
/// Progress reported once loading is complete
pub const PROGRESS_DONE: u8 = 100;

/// A dataset together with where it was loaded from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub origin: DataOrigin,
}

impl From<LoadedDataset> for SheetData {
    fn from(loaded: LoadedDataset) -> Self {
        SheetData::new(loaded.dataset, loaded.origin)
    }
}

/// Messages sent from the background load to the main app
#[derive(Debug, Clone)]
pub enum LoadMessage {
    /// Load progress as a percentage
    Progress(u8),
    /// The dataset is ready
    Loaded(LoadedDataset),
    /// The sheet could not be fetched
    Failed(String),
}

/// Everything the background load needs
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Sheet to load
    pub source: SheetSource,
    /// Cache to read first and write after a fetch; `None` disables caching
    pub cache: Option<CacheStore>,
    /// Client used on a cache miss
    pub client: SheetClient,
}

/// Loads the sheet from cache, falling back to the network
///
/// # Arguments
/// * `cache` - Cache to consult first and populate after a fetch
/// * `client` - Client used on a cache miss
/// * `source` - Sheet to load
/// * `progress` - Called with 10, 50, 75, 90 and 100 during a network load
///
/// # Returns
/// * `Ok(LoadedDataset)` from the cache or the network
/// * `Err(FetchError)` if the cache missed and the fetch failed
///
/// # Behavior
/// - A cache hit returns immediately without any progress calls
/// - A failed cache write is logged and does not fail the load
pub async fn load_dataset(
    cache: Option<&CacheStore>,
    client: &SheetClient,
    source: &SheetSource,
    mut progress: impl FnMut(u8),
) -> Result<LoadedDataset, FetchError> {
    if let Some(dataset) = cache.and_then(CacheStore::get) {
        return Ok(LoadedDataset {
            dataset,
            origin: DataOrigin::Cache,
        });
    }

    progress(PROGRESS_FETCH_STARTED);
    let dataset = client.fetch_with_progress(source, &mut progress).await?;
    progress(PROGRESS_PARSED);
    info!(
        columns = dataset.headers.len(),
        rows = dataset.row_count(),
        "fetched sheet"
    );

    if let Some(cache) = cache {
        if let Err(e) = cache.put(&dataset) {
            warn!(error = %e, "cache write failed");
        }
    }

    progress(PROGRESS_DONE);
    Ok(LoadedDataset {
        dataset,
        origin: DataOrigin::Network,
    })
}

/// Handle for receiving updates from a background load
pub struct LoadHandle {
    /// Channel for receiving load messages
    pub receiver: mpsc::Receiver<LoadMessage>,
}

impl LoadHandle {
    /// Spawns the load sequence on a tokio task
    ///
    /// # Returns
    /// A LoadHandle that receives progress and the final outcome via `receiver`
    pub fn spawn(config: LoadConfig) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel(32);

        tokio::spawn(async move {
            let progress_tx = msg_tx.clone();
            let result = load_dataset(
                config.cache.as_ref(),
                &config.client,
                &config.source,
                |p| {
                    let _ = progress_tx.try_send(LoadMessage::Progress(p));
                },
            )
            .await;

            let message = match result {
                Ok(loaded) => LoadMessage::Loaded(loaded),
                Err(e) => {
                    error!(error = %e, "sheet load failed");
                    LoadMessage::Failed(e.to_string())
                }
            };
            let _ = msg_tx.send(message).await;
        });

        Self { receiver: msg_rx }
    }
}

/// Checks for pending load messages without blocking
///
/// # Returns
/// * `Some(LoadMessage)` if a message was available
/// * `None` if no messages are pending
pub fn try_recv(handle: &mut LoadHandle) -> Option<LoadMessage> {
    handle.receiver.try_recv().ok()
}
