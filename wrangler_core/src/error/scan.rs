//! Scan errors and recoverable scan warnings

use std::path::{Path, PathBuf};
use thiserror::Error;

use super::IoError;

/// Fatal errors that stop a scan call
#[derive(Error, Debug)]
pub enum ScanError {
    /// Root path is missing or not a directory
    #[error("Invalid scan root {}: {reason}", path.display())]
    InvalidRoot { path: PathBuf, reason: String },

    /// Scan aborted through its cancellation token
    #[error("Scan cancelled")]
    Cancelled,
}

impl ScanError {
    /// Root path does not exist
    pub fn not_found(path: &Path) -> Self {
        Self::InvalidRoot {
            path: path.to_path_buf(),
            reason: "path does not exist".to_string(),
        }
    }

    /// Root path exists but is not a directory
    pub fn not_a_directory(path: &Path) -> Self {
        Self::InvalidRoot {
            path: path.to_path_buf(),
            reason: "not a directory".to_string(),
        }
    }
}

/// Recoverable conditions collected during a scan
///
/// None of these stop processing. Each one is logged at `warn` level when it
/// is raised and handed back to the caller in the scan report.
#[derive(Error, Debug)]
pub enum ScanWarning {
    /// Entry could not be stat'ed or read during discovery
    #[error("Skipped unreadable entry: {source}")]
    UnreadableEntry {
        #[source]
        source: IoError,
    },

    /// File name had to be rebuilt without a known separator
    #[error(
        "Could not determine separator for sequence '{base}' in {}, defaulting to '{fallback}'",
        folder.display()
    )]
    AmbiguousSeparator {
        folder: PathBuf,
        base: String,
        fallback: char,
    },

    /// Entry matched a sequence key but could not join that sequence
    #[error("{} kept as a standalone file: {reason}", path.display())]
    FrameConflict { path: PathBuf, reason: ConflictReason },
}

impl ScanWarning {
    /// Path the warning refers to, if it names one file
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::UnreadableEntry { source } => source.path.as_deref(),
            Self::AmbiguousSeparator { .. } => None,
            Self::FrameConflict { path, .. } => Some(path),
        }
    }

    pub(crate) fn log(&self) {
        log::warn!("{self}");
    }
}

/// Why a matched entry could not be merged into its key's sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictReason {
    /// Another entry already supplied this frame number
    DuplicateFrame { frame: u64 },
}

impl std::fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateFrame { frame } => write!(f, "frame {frame} already present"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_invalid_root_messages() {
        let missing = ScanError::not_found(Path::new("/nope"));
        assert!(missing.to_string().contains("/nope"));
        assert!(missing.to_string().contains("does not exist"));

        let file_root = ScanError::not_a_directory(Path::new("/etc/hosts"));
        assert!(file_root.to_string().contains("not a directory"));
    }

    #[test]
    fn test_unreadable_entry_path() {
        let source = IoError::from_std(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
            .with_path(Path::new("/renders/locked.exr"));
        let warning = ScanWarning::UnreadableEntry { source };

        assert_eq!(warning.path(), Some(Path::new("/renders/locked.exr")));
        assert!(warning.to_string().contains("Skipped unreadable entry"));
    }

    #[test]
    fn test_frame_conflict_display() {
        let warning = ScanWarning::FrameConflict {
            path: PathBuf::from("/renders/shot_1.exr"),
            reason: ConflictReason::DuplicateFrame { frame: 1 },
        };

        let message = warning.to_string();
        assert!(message.contains("shot_1.exr"));
        assert!(message.contains("frame 1 already present"));
    }

    #[test]
    fn test_ambiguous_separator_display() {
        let warning = ScanWarning::AmbiguousSeparator {
            folder: PathBuf::from("/renders"),
            base: "shot".to_string(),
            fallback: '.',
        };

        assert!(warning.path().is_none());
        assert!(warning.to_string().contains("defaulting to '.'"));
    }
}
