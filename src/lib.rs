//! dirstream - Asynchronous Directory Listing
//!
//! A small library for enumerating the direct children of a directory
//! without blocking the caller. Each listing runs as its own background
//! task on the tokio runtime, streams every discovered name to an
//! optional per-entry callback as it arrives, and hands back the full
//! ordered list once the listing finishes.
//!
//! # Features
//!
//! - **Fire-and-forget**: `spawn()` returns a handle immediately; the
//!   caller keeps working and joins the result whenever it wants.
//!
//! - **Streaming callbacks**: an `on_entry` hook fires for every matched
//!   name, in discovery order, before the name lands in the result.
//!
//! - **Cooperative cancellation**: a shared set-once flag is polled at a
//!   short bounded interval; setting it aborts the listing early and
//!   yields whatever was collected so far as a partial result.
//!
//! - **Name globbing**: optional shell-style patterns (`*`, `?`) applied
//!   to entry names only, never full paths.
//!
//! # Example
//!
//! ```no_run
//! use dirstream::{DirLister, ListRequest, NamePattern};
//!
//! # async fn demo() -> dirstream::Result<()> {
//! let request = ListRequest::files("/var/log")
//!     .with_pattern(NamePattern::new("*.log").unwrap());
//!
//! let handle = DirLister::new(request)
//!     .on_entry(|name| println!("found: {name}"))
//!     .spawn();
//!
//! // ... do other work ...
//!
//! let summary = handle.join().await?;
//! println!("{} entries in {:?}", summary.entries.len(), summary.duration);
//! # Ok(())
//! # }
//! ```

pub mod cancel;
pub mod config;
pub mod error;
pub mod list;

pub use cancel::CancelFlag;
pub use config::{CliArgs, ListMode, ListRequest, NamePattern};
pub use error::{ConfigError, ListError, Result};
pub use list::{DirLister, ListHandle, ListSummary};
