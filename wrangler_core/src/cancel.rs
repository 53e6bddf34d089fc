//! Cooperative cancellation for long scans

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::ScanError;

/// Shared flag a caller flips to abort a running scan
///
/// Clones observe the same flag, so one clone can be handed to a signal
/// handler while another is passed into the scan.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Return `Cancelled` if cancellation was requested
    pub fn check(&self) -> Result<(), ScanError> {
        if self.is_cancelled() {
            Err(ScanError::Cancelled)
        } else {
            Ok(())
        }
    }
}
