//! File discovery module for finding media files under a root directory
//!
//! Walks the tree, applies recursion, extension and exclusion filters and
//! returns an unordered list of file entries. Entries that cannot be read are
//! skipped with a warning instead of aborting the walk.

pub mod extensions;
mod filter;
mod walker;

pub use filter::{FileFilter, PatternMatcher};
pub use walker::{DiscoveryOptions, FileDiscovery};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cancel::CancellationToken;
use crate::error::{Result, ScanWarning};
use crate::progress::{NullProvider, ProgressProvider, ProgressUpdate};

/// How many accepted files pass between two `FilesDiscovered` updates
const PROGRESS_INTERVAL: usize = 256;

/// A regular file found during discovery
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path to the file, rooted wherever the scan root was rooted
    pub path: PathBuf,
    /// Size of the file in bytes at discovery time
    #[serde(default)]
    pub size: u64,
}

impl FileEntry {
    /// Entry for a path whose size is unknown
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            size: 0,
        }
    }

    pub fn with_size(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }

    /// File name as UTF-8, if it is valid UTF-8
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }

    /// Directory containing the file
    pub fn folder(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }
}

impl From<PathBuf> for FileEntry {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&Path> for FileEntry {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

impl From<&str> for FileEntry {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Everything a discovery pass produced
#[derive(Debug, Default)]
pub struct DiscoveryOutcome {
    pub entries: Vec<FileEntry>,
    pub warnings: Vec<ScanWarning>,
}

/// Discover files under `root`
///
/// Unreadable entries are logged and dropped. Use [`discover_with`] to keep
/// the warnings or to cancel a long walk.
pub fn discover(root: &Path, options: &DiscoveryOptions) -> Result<Vec<FileEntry>> {
    discover_with(root, options, &CancellationToken::new(), &NullProvider)
        .map(|outcome| outcome.entries)
}

/// Discover files under `root`, honouring a cancellation token
///
/// Cancellation is checked before every walked entry. A cancelled walk
/// returns `Cancelled` and discards what it had found.
pub fn discover_with(
    root: &Path,
    options: &DiscoveryOptions,
    cancel: &CancellationToken,
    progress: &dyn ProgressProvider,
) -> Result<DiscoveryOutcome> {
    cancel.check()?;
    let discovery = FileDiscovery::new(root, options)?;
    let mut outcome = DiscoveryOutcome::default();

    for item in discovery {
        cancel.check()?;

        match item {
            Ok(entry) => {
                outcome.entries.push(entry);
                if outcome.entries.len() % PROGRESS_INTERVAL == 0 {
                    progress.report(ProgressUpdate::FilesDiscovered {
                        count: outcome.entries.len(),
                    });
                }
            }
            Err(warning) => {
                warning.log();
                outcome.warnings.push(warning);
            }
        }
    }

    progress.report(ProgressUpdate::FilesDiscovered {
        count: outcome.entries.len(),
    });
    log::debug!(
        "Discovered {} file(s) under {} ({} unreadable)",
        outcome.entries.len(),
        root.display(),
        outcome.warnings.len()
    );

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_file_entry_accessors() {
        let entry = FileEntry::new("/renders/shot_001.exr");

        assert_eq!(entry.file_name(), Some("shot_001.exr"));
        assert_eq!(entry.folder(), Path::new("/renders"));
        assert_eq!(entry.size, 0);
    }

    #[test]
    fn test_bare_file_name_has_empty_folder() {
        let entry = FileEntry::from("a_1.png");
        assert_eq!(entry.folder(), Path::new(""));
    }

    #[test]
    fn test_discover_returns_entries() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.png"), b"x").unwrap();
        fs::write(dir.path().join("b.png"), b"x").unwrap();

        let entries = discover(dir.path(), &DiscoveryOptions::new()).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_discover_with_cancelled_token() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.png"), b"x").unwrap();

        let token = CancellationToken::new();
        token.cancel();

        let result = discover_with(dir.path(), &DiscoveryOptions::new(), &token, &NullProvider);
        assert!(result.is_err_and(|e| e.is_cancelled()));
    }
}
