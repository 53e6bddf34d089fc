//! Entry filtering for discovery
//!
//! Combines the extension filter, excluded directory names and optional glob
//! exclude patterns. All paths given to the filter are relative to the scan
//! root.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::Path;

use super::extensions::normalize_extension;
use crate::error::{Result, ValidationError};

/// Pattern matcher using GlobSet for efficient matching
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    /// Compiled glob set for matching
    globset: GlobSet,
    /// Original patterns for debugging
    patterns: Vec<String>,
}

impl PatternMatcher {
    /// Create a new pattern matcher from glob patterns
    pub fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();

        for pattern in patterns {
            let glob = Glob::new(pattern)
                .map_err(|e| ValidationError::invalid_pattern(pattern, e.kind()))?;
            builder.add(glob);
        }

        let globset = builder
            .build()
            .map_err(|e| ValidationError::invalid_pattern(&patterns.join(","), e))?;

        Ok(Self {
            globset,
            patterns: patterns.to_vec(),
        })
    }

    /// Check if a path matches any of the patterns
    pub fn matches(&self, path: &Path) -> bool {
        self.globset.is_match(path)
    }

    /// Get the original patterns
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// File filter applied to every walked entry
#[derive(Debug)]
pub struct FileFilter {
    /// Normalized extensions; `None` accepts every file
    extensions: Option<BTreeSet<String>>,
    /// Directory names pruned from the walk
    exclude_dir_names: BTreeSet<String>,
    /// Glob exclude patterns
    exclude_matcher: Option<PatternMatcher>,
}

impl FileFilter {
    /// Create a new file filter
    pub fn new(
        extensions: Option<BTreeSet<String>>,
        exclude_dir_names: BTreeSet<String>,
        exclude_patterns: &[String],
    ) -> Result<Self> {
        let exclude_matcher = if !exclude_patterns.is_empty() {
            Some(PatternMatcher::new(exclude_patterns)?)
        } else {
            None
        };

        Ok(Self {
            extensions,
            exclude_dir_names,
            exclude_matcher,
        })
    }

    /// Whether a directory with this name is skipped together with everything
    /// below it
    pub fn excludes_dir_name(&self, name: &OsStr) -> bool {
        !self.exclude_dir_names.is_empty()
            && name
                .to_str()
                .is_some_and(|name| self.exclude_dir_names.contains(name))
    }

    /// Whether any directory segment of a root-relative file path is excluded
    pub fn excludes_any_segment(&self, relative: &Path) -> bool {
        relative
            .parent()
            .into_iter()
            .flat_map(Path::components)
            .any(|segment| self.excludes_dir_name(segment.as_os_str()))
    }

    /// Check if a file should be included
    ///
    /// Rules:
    /// 1. If a directory segment is excluded -> false
    /// 2. If path matches exclude patterns -> false
    /// 3. If no extension filter -> true
    /// 4. If the file extension is in the filter -> true
    /// 5. Otherwise -> false
    pub fn should_include(&self, relative: &Path) -> bool {
        if self.excludes_any_segment(relative) {
            return false;
        }

        if let Some(ref exclude) = self.exclude_matcher
            && exclude.matches(relative)
        {
            return false;
        }

        match &self.extensions {
            None => true,
            Some(allowed) => relative
                .extension()
                .and_then(OsStr::to_str)
                .is_some_and(|ext| allowed.contains(&normalize_extension(ext))),
        }
    }
}
