//! Builders for on-disk test fixtures

mod media_tree;

pub use media_tree::{MediaTree, MediaTreeBuilder, frame_names};
