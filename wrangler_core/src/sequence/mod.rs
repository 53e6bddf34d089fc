//! Frame sequence detection
//!
//! Matching parses one file name at a time; assembly groups the matches by
//! folder, base name and extension and applies the minimum length.

mod assembler;
mod group;
mod pattern;

pub use assembler::{Assembly, SequenceAssembler};
pub use group::{SequenceGroup, SequenceKey};
pub use pattern::{
    FrameMatch, MatchResult, Separator, format_frame, frame_file_name, match_entry,
    match_file_name,
};

use crate::discovery::FileEntry;
use crate::error::Result;
use crate::media::{MediaItem, materialize};

/// Group entries and wrap the result as media items
pub fn assemble(entries: Vec<FileEntry>, min_sequence_length: usize) -> Result<Vec<MediaItem>> {
    let assembly = SequenceAssembler::new(min_sequence_length)?.assemble(entries);
    Ok(materialize(assembly))
}
