//! Cancellation-aware execution context.
//!
//! Every detection and scrape entry point takes a [`Context`]. The core never
//! injects timeouts of its own; sources and readers call [`Context::check`]
//! before touching the OS, and a cancelled context surfaces as an ordinary
//! [`CoreError::Cancelled`] failure on the fallback/partial-failure paths.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::error::{CoreError, Result};

/// Execution context shared between a host and the calls it drives.
///
/// Clones share the cancellation flag, so the host can keep one clone and
/// cancel work that was handed another.
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl Context {
    /// Creates a context that is never cancelled unless [`cancel`](Self::cancel) is called.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a clone of this context that also expires after `timeout`.
    ///
    /// A timeout too large to represent as an instant adds no deadline.
    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        let deadline = match (Instant::now().checked_add(timeout), self.deadline) {
            (Some(new), Some(old)) => Some(old.min(new)),
            (new, old) => new.or(old),
        };
        Self {
            cancelled: Arc::clone(&self.cancelled),
            deadline,
        }
    }

    /// Cancels this context and every clone of it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns true if the context was cancelled or its deadline passed.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
            || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Fails with [`CoreError::Cancelled`] if the context is done.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(CoreError::Cancelled)
        } else {
            Ok(())
        }
    }
}
