use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::utils::error::{HuffError, Result};

/// Advisory cancellation flag shared between a host and a running session.
///
/// The session polls the flag between symbols; once it is raised the session
/// stops reading and returns [`HuffError::Cancelled`]. Whatever was already
/// written to the output is invalid and must be discarded by the host.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Every clone of this token observes it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Returns `Err(Cancelled)` once cancellation has been requested.
    #[inline]
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(HuffError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Counts symbols processed by a session so a host can draw a progress bar
/// from another thread.
#[derive(Debug, Clone, Default)]
pub struct ProgressCounter {
    processed: Arc<AtomicU64>,
}

impl ProgressCounter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn advance(&self, n: u64) {
        self.processed.fetch_add(n, Ordering::Relaxed);
    }

    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.processed.store(0, Ordering::Relaxed);
    }
}
