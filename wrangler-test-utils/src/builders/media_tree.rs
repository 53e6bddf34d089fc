//! Media tree fixture builder

use std::fs;
use std::io;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wrangler_core::FileEntry;

/// Names of a numbered frame run, e.g. `shot_001.exr ..= shot_003.exr`
pub fn frame_names(
    base: &str,
    separator: char,
    frames: RangeInclusive<u64>,
    padding: usize,
    extension: &str,
) -> Vec<String> {
    frames
        .map(|frame| format!("{base}{separator}{frame:0padding$}{extension}"))
        .collect()
}

/// Builder for a temporary directory filled with media files
///
/// Paths are relative to the tree root; parent directories are created as
/// needed.
#[derive(Debug, Default)]
pub struct MediaTreeBuilder {
    files: Vec<(PathBuf, u64)>,
}

impl MediaTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one file with a few bytes of content
    pub fn with_file(self, relative: impl AsRef<Path>) -> Self {
        self.with_file_size(relative, 4)
    }

    /// Add one file of exactly `size` bytes
    pub fn with_file_size(mut self, relative: impl AsRef<Path>, size: u64) -> Self {
        self.files.push((relative.as_ref().to_path_buf(), size));
        self
    }

    /// Add every frame of a numbered run inside `folder`
    pub fn with_sequence(
        mut self,
        folder: impl AsRef<Path>,
        base: &str,
        separator: char,
        frames: RangeInclusive<u64>,
        padding: usize,
        extension: &str,
    ) -> Self {
        let folder = folder.as_ref();
        for name in frame_names(base, separator, frames, padding, extension) {
            self.files.push((folder.join(name), 4));
        }
        self
    }

    /// Write the tree to a fresh temporary directory
    pub fn build(self) -> io::Result<MediaTree> {
        let dir = TempDir::new()?;
        let mut files = Vec::with_capacity(self.files.len());

        for (relative, size) in self.files {
            let path = dir.path().join(&relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, vec![0u8; size as usize])?;
            files.push(path);
        }

        files.sort();
        files.dedup();
        Ok(MediaTree { dir, files })
    }
}

/// A media tree on disk, removed when dropped
#[derive(Debug)]
pub struct MediaTree {
    dir: TempDir,
    files: Vec<PathBuf>,
}

impl MediaTree {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute paths of every written file, sorted
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Written files as discovery entries, sizes included
    pub fn entries(&self) -> io::Result<Vec<FileEntry>> {
        self.files
            .iter()
            .map(|path| Ok(FileEntry::with_size(path, fs::metadata(path)?.len())))
            .collect()
    }
}
