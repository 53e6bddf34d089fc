//! Flat metadata records for reports and listings

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{MediaItem, MediaType};

/// One row describing a media item
///
/// Sequence-only fields are `None` for standalone files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub display_name: String,
    /// File path, or the representative frame for sequences
    pub path: Option<PathBuf>,
    pub extension: String,
    pub media_type: MediaType,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_frame: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_frame: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_frame: Option<u64>,
}

impl MediaRecord {
    pub fn is_sequence(&self) -> bool {
        self.frame_count.is_some()
    }
}

impl From<&MediaItem> for MediaRecord {
    fn from(item: &MediaItem) -> Self {
        let sequence = item.as_sequence();

        Self {
            display_name: item.display_name(),
            path: item.representative_path(),
            extension: item.extension(),
            media_type: item.media_type(),
            size: item.size(),
            frame_count: sequence.map(|group| group.frame_count()),
            start_frame: sequence.and_then(|group| group.start_frame()),
            end_frame: sequence.and_then(|group| group.end_frame()),
            middle_frame: sequence.and_then(|group| group.middle_frame()),
        }
    }
}
