//! Directory lister - one background task per listing
//!
//! Each listing owns its directory reader exclusively and walks it
//! sequentially: filter by mode, filter by pattern, fire the per-entry
//! handler, append to the result. The cancel flag is re-checked between
//! entries and, while the reader is idle, once per poll interval, so
//! worst-case cancellation latency stays bounded.
//!
//! Terminal outcomes:
//! - completed listing (`ListSummary { completed: true, .. }`)
//! - cancelled listing with a partial result (`completed: false`)
//! - failure on the join channel (`ListError`)

use crate::cancel::CancelFlag;
use crate::config::ListRequest;
use crate::error::{ListError, Result};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, info};

/// How long a single wait on the reader may last before the cancel flag
/// is re-checked. Bounds cancellation latency while the reader is idle.
pub const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Per-entry hook, invoked on the background task in discovery order
pub type EntryHandler = Box<dyn FnMut(&str) + Send>;

/// Outcome of a finished (or cancelled) listing
#[derive(Debug)]
pub struct ListSummary {
    /// Matched entry names, in discovery order
    pub entries: Vec<String>,

    /// False if the listing stopped early because the cancel flag was set
    pub completed: bool,

    /// Wall-clock time the listing ran for
    pub duration: Duration,
}

/// Configures and launches one directory listing
///
/// Mirrors the one-shot lifecycle of a listing: build, optionally attach
/// a handler, grab the cancel flag if early abort is needed, then either
/// `spawn()` for fire-and-forget or `run().await` in place.
pub struct DirLister {
    request: ListRequest,
    cancel: CancelFlag,
    handler: Option<EntryHandler>,
}

impl DirLister {
    /// Create a lister for the given request
    pub fn new(request: ListRequest) -> Self {
        Self {
            request,
            cancel: CancelFlag::new(),
            handler: None,
        }
    }

    /// Get a clone of the cancel flag for external cancellation
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Attach a per-entry handler
    ///
    /// The handler runs synchronously on the background task for every
    /// matched name, before that name is appended to the result. Without
    /// a handler the listing only collects.
    pub fn on_entry<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Launch the listing on the tokio runtime and return immediately
    ///
    /// Must be called from within a runtime. The caller may keep working
    /// and retrieve the outcome later via [`ListHandle::join`].
    pub fn spawn(self) -> ListHandle {
        let cancel = self.cancel.clone();
        let task = tokio::spawn(list_entries(self.request, self.handler, self.cancel));
        ListHandle { task, cancel }
    }

    /// Run the listing and wait for its outcome in place
    pub async fn run(self) -> Result<ListSummary> {
        self.spawn().join().await
    }
}

/// Handle to a listing running in the background
pub struct ListHandle {
    task: JoinHandle<Result<ListSummary>>,
    cancel: CancelFlag,
}

impl ListHandle {
    /// Get a clone of the cancel flag for this listing
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Request cancellation of this listing
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the listing to finish and take its outcome
    ///
    /// A handler panic on the background task surfaces here as
    /// [`ListError::HandlerPanic`] rather than being swallowed.
    pub async fn join(self) -> Result<ListSummary> {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_panic() => Err(ListError::HandlerPanic),
            Err(_) => Err(ListError::TaskFailed),
        }
    }
}

/// The listing loop itself
async fn list_entries(
    request: ListRequest,
    mut handler: Option<EntryHandler>,
    cancel: CancelFlag,
) -> Result<ListSummary> {
    let start = Instant::now();

    debug!(
        dir = %request.dir.display(),
        mode = ?request.mode,
        pattern = request.pattern.as_ref().map(|p| p.as_str()),
        "Starting directory listing"
    );

    let mut reader = tokio::fs::read_dir(&request.dir)
        .await
        .map_err(|e| ListError::open(&request.dir, e))?;

    let mut entries: Vec<String> = Vec::new();

    let completed = loop {
        if cancel.is_cancelled() {
            debug!(collected = entries.len(), "Cancellation observed, stopping early");
            break false;
        }

        // next_entry is cancel safe, so dropping it on a poll tick loses nothing
        let entry = match timeout(CANCEL_POLL_INTERVAL, reader.next_entry()).await {
            Err(_) => continue, // poll tick elapsed, re-check the flag
            Ok(Ok(Some(entry))) => entry,
            Ok(Ok(None)) => break true,
            Ok(Err(e)) => {
                return Err(ListError::ReadDir {
                    path: request.dir.clone(),
                    source: e,
                })
            }
        };

        let file_type = match entry.file_type().await {
            Ok(file_type) => file_type,
            Err(e) => {
                // entry vanished between readdir and stat
                debug!(
                    name = %entry.file_name().to_string_lossy(),
                    error = %e,
                    "Skipping entry with unreadable type"
                );
                continue;
            }
        };

        if !request.mode.matches(file_type) {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some(pattern) = &request.pattern {
            if !pattern.matches(&name) {
                continue;
            }
        }

        if let Some(handler) = handler.as_mut() {
            handler(&name);
        }
        entries.push(name);
    };

    let duration = start.elapsed();

    info!(
        dir = %request.dir.display(),
        entries = entries.len(),
        completed,
        duration_ms = duration.as_millis() as u64,
        "Listing finished"
    );

    // reader drops here on every path, releasing the directory handle
    Ok(ListSummary {
        entries,
        completed,
        duration,
    })
}
