//! Directory walker module for file discovery
//!
//! Provides streaming file discovery using walkdir. Excluded directories are
//! pruned during the walk rather than filtered afterwards.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::{DirEntry, WalkDir};

use super::{FileEntry, extensions::normalize_extensions, filter::FileFilter};
use crate::error::{IoError, Result, ScanError, ScanWarning};

/// Options for file discovery
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Process directories recursively
    pub recursive: bool,
    /// Normalized extensions to accept (None = all files)
    pub extensions: Option<BTreeSet<String>>,
    /// Directory names excluded anywhere below the root
    pub exclude_dir_names: BTreeSet<String>,
    /// Glob patterns matched against root-relative paths
    pub exclude_patterns: Vec<String>,
    /// Follow symbolic links
    pub follow_links: bool,
    /// Maximum depth for recursive search (None = unlimited)
    pub max_depth: Option<usize>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            recursive: true,
            extensions: None,
            exclude_dir_names: BTreeSet::new(),
            exclude_patterns: Vec::new(),
            follow_links: false,
            max_depth: None,
        }
    }
}

impl DiscoveryOptions {
    /// Create new options with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set recursive processing
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Restrict discovery to these extensions
    ///
    /// Extensions are compared case-insensitively and without leading dots.
    /// An empty list removes the filter.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalized = normalize_extensions(extensions);
        self.extensions = (!normalized.is_empty()).then_some(normalized);
        self
    }

    /// Set excluded directory names
    pub fn with_exclude_dir_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_dir_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Add exclude patterns
    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    /// Set whether to follow symbolic links
    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Set maximum depth for recursive search
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }
}

/// File discovery iterator for streaming file enumeration
///
/// Yields discovered files, or a recoverable warning for every entry that
/// could not be read. Neither ends the iteration.
pub struct FileDiscovery {
    /// Scan root, used to relativize paths before filtering
    root: PathBuf,
    /// Walker for directory traversal
    walker: Box<dyn Iterator<Item = walkdir::Result<DirEntry>>>,
    /// File filter shared with the pruning predicate
    filter: Arc<FileFilter>,
}

impl FileDiscovery {
    /// Create a new file discovery iterator
    ///
    /// Fails with `InvalidRoot` when `root` is missing or not a directory, and
    /// with an I/O error when `root` cannot be inspected at all.
    pub fn new(root: &Path, options: &DiscoveryOptions) -> Result<Self> {
        validate_root(root)?;

        let filter = Arc::new(FileFilter::new(
            options.extensions.clone(),
            options.exclude_dir_names.clone(),
            &options.exclude_patterns,
        )?);

        let mut walker = WalkDir::new(root)
            .follow_links(options.follow_links)
            .min_depth(1);

        if !options.recursive {
            walker = walker.max_depth(1);
        } else if let Some(depth) = options.max_depth {
            walker = walker.max_depth(depth);
        }

        let prune = Arc::clone(&filter);
        let walker = walker.into_iter().filter_entry(move |entry| {
            entry.depth() == 0
                || !(entry.file_type().is_dir() && prune.excludes_dir_name(entry.file_name()))
        });

        Ok(Self {
            root: root.to_path_buf(),
            walker: Box::new(walker),
            filter,
        })
    }

    /// Check if an entry is a file we should include
    fn should_include_entry(&self, entry: &DirEntry) -> bool {
        // Skip directories and anything else that is not a regular file
        if !entry.file_type().is_file() {
            return false;
        }

        let relative = entry.path().strip_prefix(&self.root).unwrap_or(entry.path());
        self.filter.should_include(relative)
    }
}

impl Iterator for FileDiscovery {
    type Item = std::result::Result<FileEntry, ScanWarning>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.walker.next()? {
                Ok(entry) => {
                    if !self.should_include_entry(&entry) {
                        continue;
                    }

                    return Some(match entry.metadata() {
                        Ok(metadata) => Ok(FileEntry::with_size(entry.into_path(), metadata.len())),
                        Err(e) => Err(ScanWarning::UnreadableEntry {
                            source: IoError::from_walk(e),
                        }),
                    });
                }
                Err(e) => {
                    return Some(Err(ScanWarning::UnreadableEntry {
                        source: IoError::from_walk(e),
                    }));
                }
            }
        }
    }
}

fn validate_root(root: &Path) -> Result<()> {
    match std::fs::metadata(root) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(ScanError::not_a_directory(root).into()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ScanError::not_found(root).into())
        }
        Err(e) => Err(IoError::from_std(e).with_path(root).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_directory() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::write(base.join("shot_001.exr"), b"test").unwrap();
        fs::write(base.join("shot_002.exr"), b"test").unwrap();
        fs::write(base.join("clip.MP4"), b"test").unwrap();
        fs::write(base.join("notes.txt"), b"test").unwrap();

        let subdir = base.join("subdir");
        fs::create_dir(&subdir).unwrap();
        fs::write(subdir.join("nested.png"), b"test").unwrap();

        let thumbs = subdir.join("thumbnails");
        fs::create_dir(&thumbs).unwrap();
        fs::write(thumbs.join("nested_thumb.png"), b"test").unwrap();

        dir
    }

    fn collect_names(discovery: FileDiscovery) -> Vec<String> {
        let mut names: Vec<String> = discovery
            .map(|entry| entry.unwrap())
            .map(|entry| entry.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_discovery_recursive_all_files() {
        let dir = create_test_directory();
        let discovery = FileDiscovery::new(dir.path(), &DiscoveryOptions::new()).unwrap();

        assert_eq!(
            collect_names(discovery),
            vec![
                "clip.MP4",
                "nested.png",
                "nested_thumb.png",
                "notes.txt",
                "shot_001.exr",
                "shot_002.exr"
            ]
        );
    }

    #[test]
    fn test_discovery_non_recursive() {
        let dir = create_test_directory();
        let options = DiscoveryOptions::new().with_recursive(false);
        let discovery = FileDiscovery::new(dir.path(), &options).unwrap();

        let names = collect_names(discovery);
        assert_eq!(names.len(), 4);
        assert!(!names.contains(&"nested.png".to_string()));
    }

    #[test]
    fn test_discovery_with_extensions() {
        let dir = create_test_directory();
        let options = DiscoveryOptions::new().with_extensions([".EXR", "mp4"]);
        let discovery = FileDiscovery::new(dir.path(), &options).unwrap();

        assert_eq!(
            collect_names(discovery),
            vec!["clip.MP4", "shot_001.exr", "shot_002.exr"]
        );
    }

    #[test]
    fn test_discovery_prunes_excluded_directories() {
        let dir = create_test_directory();
        let options = DiscoveryOptions::new().with_exclude_dir_names(["thumbnails"]);
        let discovery = FileDiscovery::new(dir.path(), &options).unwrap();

        let names = collect_names(discovery);
        assert!(names.contains(&"nested.png".to_string()));
        assert!(!names.contains(&"nested_thumb.png".to_string()));
    }

    #[test]
    fn test_discovery_records_file_size() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("frame.1.png"), vec![0u8; 42]).unwrap();

        let entries: Vec<_> = FileDiscovery::new(dir.path(), &DiscoveryOptions::new())
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].size, 42);
    }

    #[test]
    fn test_discovery_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");

        let result = FileDiscovery::new(&missing, &DiscoveryOptions::new());
        assert!(result.is_err_and(|e| e.is_invalid_root()));
    }

    #[test]
    fn test_discovery_file_root() {
        let dir = create_test_directory();
        let file_root = dir.path().join("notes.txt");

        let result = FileDiscovery::new(&file_root, &DiscoveryOptions::new());
        assert!(result.is_err_and(|e| e.is_invalid_root()));
    }

    #[cfg(unix)]
    #[test]
    fn test_discovery_root_below_file_is_io_error() {
        let dir = create_test_directory();
        let root = dir.path().join("notes.txt").join("renders");

        match FileDiscovery::new(&root, &DiscoveryOptions::new()) {
            Err(Error::Io(io_error)) => {
                assert_eq!(io_error.path.as_deref(), Some(root.as_path()));
                assert!(io_error.source.is_some());
            }
            Err(other) => panic!("Expected Io error, got {other:?}"),
            Ok(_) => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_discovery_exclude_patterns() {
        let dir = create_test_directory();
        let options = DiscoveryOptions::new()
            .with_exclude_patterns(vec!["*.txt".to_string(), "subdir/**".to_string()]);
        let discovery = FileDiscovery::new(dir.path(), &options).unwrap();

        assert_eq!(
            collect_names(discovery),
            vec!["clip.MP4", "shot_001.exr", "shot_002.exr"]
        );
    }
}
