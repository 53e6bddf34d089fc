//! Wrangler core library
//!
//! Discovers media files under a directory tree and groups numbered frames
//! such as `shot_001.exr … shot_240.exr` into frame sequences. The result is
//! a list of [`MediaItem`]s, each either a standalone file or a sequence.

pub mod cancel;
pub mod config;
pub mod discovery;
pub mod error;
pub mod media;
pub mod progress;
pub mod scan;
pub mod sequence;

// Re-export main types
pub use cancel::CancellationToken;
pub use config::{ScanConfig, ScanConfigBuilder};
pub use discovery::{DiscoveryOptions, FileEntry, discover};
pub use error::{Error, Result, ScanWarning};
pub use media::{MediaItem, MediaRecord, MediaType, materialize, materialize_files, thumbnail_path};
pub use progress::{NullProvider, ProgressProvider, ProgressUpdate, ScanStage, SharedProvider};
pub use scan::{ScanReport, ScanStats, scan, scan_media_items};
pub use sequence::{
    MatchResult, SequenceAssembler, SequenceGroup, SequenceKey, Separator, assemble,
    match_entry,
};
