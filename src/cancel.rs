//! Cancellation flag shared between a caller and a running listing
//!
//! The flag only ever transitions unset -> set. The running listing polls
//! it between entries and while waiting on the reader, so set-once
//! semantics are safe with a single atomic and no lock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared, set-once cancellation signal
///
/// Cloning yields another handle to the same flag. `cancel()` is
/// idempotent; there is no way to reset a flag once set.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    inner: Arc<AtomicBool>,
}

impl CancelFlag {
    /// Create a new, unset flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    ///
    /// The running listing observes this within one poll interval and
    /// returns whatever it has collected as a partial result.
    pub fn cancel(&self) {
        self.inner.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::Relaxed)
    }
}
