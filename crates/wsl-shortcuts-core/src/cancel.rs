//! Cooperative cancellation for long-running discovery.
//!
//! Discovery spawns one subsystem process per manifest; the token is checked
//! between those calls so closing the front-end does not leave a scan running.

use crate::error::ShortcutError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cancellation token shared between the caller and a background task.
///
/// Clones share state: cancelling any clone cancels all of them.
///
/// # Example
///
/// ```
/// use wsl_shortcuts_core::CancellationToken;
///
/// let token = CancellationToken::new();
/// let worker_token = token.clone();
///
/// token.cancel();
/// assert!(worker_token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Return [`ShortcutError::Cancelled`] if cancellation was requested.
    pub fn check(&self) -> Result<(), ShortcutError> {
        if self.is_cancelled() {
            Err(ShortcutError::Cancelled)
        } else {
            Ok(())
        }
    }
}
