// Cooperative cancellation for checks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::CheckError;

/// Shared cancellation flag.
///
/// Clones observe the same flag, so a caller can keep one clone and hand the
/// other to a check running on another thread.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that is never cancelled.
    pub fn never() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Return `Err(CheckError::Cancelled)` once cancellation was requested.
    pub fn check(&self) -> Result<(), CheckError> {
        if self.is_cancelled() {
            Err(CheckError::Cancelled)
        } else {
            Ok(())
        }
    }
}
