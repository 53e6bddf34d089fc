//! Test utilities for the wrangler workspace
//!
//! Fixture builders that lay out media trees on disk for discovery and
//! grouping tests.

pub mod builders;

// Re-export commonly used types
pub use builders::{MediaTree, MediaTreeBuilder, frame_names};
