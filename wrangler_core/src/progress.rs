//! Progress reporting abstractions for scans
//!
//! This module provides a trait-based abstraction for progress reporting,
//! allowing the core library to report progress without depending on
//! specific channel implementations or UI concerns.

use std::sync::Arc;

/// Core trait for progress reporting
///
/// This trait abstracts away the progress reporting mechanism,
/// allowing different implementations (channels, logging, null, etc.)
pub trait ProgressProvider: Send + Sync {
    /// Report a progress update
    fn report(&self, update: ProgressUpdate);

    /// Signal that the operation is complete
    fn complete(&self);
}

/// Pipeline stage a scan is currently in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStage {
    Discovering,
    Grouping,
    Materializing,
}

impl ScanStage {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Discovering => "Discovering files",
            Self::Grouping => "Grouping frame sequences",
            Self::Materializing => "Building media items",
        }
    }
}

/// Unified progress update type
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressUpdate {
    /// A pipeline stage started
    Stage(ScanStage),

    /// Running count of accepted files during discovery
    FilesDiscovered { count: usize },

    /// Generic status message
    Status { message: String },
}

/// Null implementation for when no progress is needed
pub struct NullProvider;

impl ProgressProvider for NullProvider {
    fn report(&self, _update: ProgressUpdate) {
        // No-op: discard all progress updates
    }

    fn complete(&self) {
        // No-op
    }
}

/// Arc-wrapped provider for easy sharing across threads
pub struct SharedProvider {
    inner: Arc<dyn ProgressProvider>,
}

impl SharedProvider {
    /// Create a new shared provider wrapping the given provider
    pub fn new(provider: Arc<dyn ProgressProvider>) -> Self {
        Self { inner: provider }
    }
}

impl ProgressProvider for SharedProvider {
    fn report(&self, update: ProgressUpdate) {
        self.inner.report(update);
    }

    fn complete(&self) {
        self.inner.complete();
    }
}
