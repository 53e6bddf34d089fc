//! Media items handed to downstream consumers
//!
//! A [`MediaItem`] is either one standalone file or one promoted sequence.
//! Everything after assembly consumes this type and matches on it.

mod record;
mod thumbnail;

pub use record::MediaRecord;
pub use thumbnail::{DEFAULT_THUMBNAIL_FOLDER, DEFAULT_THUMBNAIL_SUFFIX, thumbnail_path};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::discovery::FileEntry;
use crate::discovery::extensions::{
    AUDIO_EXTENSIONS, IMAGE_EXTENSIONS, VIDEO_EXTENSIONS, normalize_extension,
};
use crate::sequence::{Assembly, SequenceGroup};

/// Broad class of a media file, taken from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    Audio,
    Other,
}

impl MediaType {
    /// Classify an extension, ignoring case and leading dots
    pub fn from_extension(extension: &str) -> Self {
        let ext = normalize_extension(extension);
        let ext = ext.as_str();

        if IMAGE_EXTENSIONS.contains(&ext) {
            Self::Image
        } else if VIDEO_EXTENSIONS.contains(&ext) {
            Self::Video
        } else if AUDIO_EXTENSIONS.contains(&ext) {
            Self::Audio
        } else {
            Self::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of scan output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MediaItem {
    File(FileEntry),
    Sequence(SequenceGroup),
}

impl MediaItem {
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    pub fn as_file(&self) -> Option<&FileEntry> {
        match self {
            Self::File(entry) => Some(entry),
            Self::Sequence(_) => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&SequenceGroup> {
        match self {
            Self::Sequence(group) => Some(group),
            Self::File(_) => None,
        }
    }

    /// File name for files, `<base><sep>[<start>-<end>]<ext>` for sequences
    pub fn display_name(&self) -> String {
        match self {
            Self::File(entry) => entry
                .path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            Self::Sequence(group) => group.display_name(),
        }
    }

    /// Extension including its dot, or empty when the file has none
    pub fn extension(&self) -> String {
        match self {
            Self::File(entry) => entry
                .path
                .extension()
                .map(|ext| format!(".{}", ext.to_string_lossy()))
                .unwrap_or_default(),
            Self::Sequence(group) => group.extension().to_string(),
        }
    }

    pub fn folder(&self) -> &Path {
        match self {
            Self::File(entry) => entry.folder(),
            Self::Sequence(group) => group.folder(),
        }
    }

    pub fn media_type(&self) -> MediaType {
        MediaType::from_extension(&self.extension())
    }

    /// Every on-disk path this item stands for
    pub fn paths(&self) -> Vec<PathBuf> {
        match self {
            Self::File(entry) => vec![entry.path.clone()],
            Self::Sequence(group) => group.member_paths(),
        }
    }

    /// Path used to represent the item, the middle frame for sequences
    pub fn representative_path(&self) -> Option<PathBuf> {
        match self {
            Self::File(entry) => Some(entry.path.clone()),
            Self::Sequence(group) => group.representative_path(),
        }
    }

    pub fn size(&self) -> u64 {
        match self {
            Self::File(entry) => entry.size,
            Self::Sequence(group) => group.total_size(),
        }
    }

    pub fn to_record(&self) -> MediaRecord {
        MediaRecord::from(self)
    }
}

impl From<FileEntry> for MediaItem {
    fn from(entry: FileEntry) -> Self {
        Self::File(entry)
    }
}

impl From<SequenceGroup> for MediaItem {
    fn from(group: SequenceGroup) -> Self {
        Self::Sequence(group)
    }
}

/// Wrap assembler output as media items in canonical order
pub fn materialize(assembly: Assembly) -> Vec<MediaItem> {
    let items = assembly
        .sequences
        .into_iter()
        .map(MediaItem::Sequence)
        .chain(assembly.standalone.into_iter().map(MediaItem::File))
        .collect();
    canonicalize(items)
}

/// Wrap entries as standalone files without any grouping
pub fn materialize_files(entries: Vec<FileEntry>) -> Vec<MediaItem> {
    canonicalize(entries.into_iter().map(MediaItem::File).collect())
}

/// Order by folder, then display name
fn canonicalize(items: Vec<MediaItem>) -> Vec<MediaItem> {
    let mut keyed: Vec<(PathBuf, String, MediaItem)> = items
        .into_iter()
        .map(|item| (item.folder().to_path_buf(), item.display_name(), item))
        .collect();
    keyed.sort_by(|a, b| (&a.0, &a.1).cmp(&(&b.0, &b.1)));
    keyed.into_iter().map(|(_, _, item)| item).collect()
}
