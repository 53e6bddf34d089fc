//! Resolved scan configuration
//!
//! A [`ScanConfig`] is built once per scan and passed by reference to every
//! stage. It cannot change after [`ScanConfigBuilder::build`] returns.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::discovery::extensions::normalize_extensions;
use crate::discovery::{DiscoveryOptions, PatternMatcher};
use crate::error::{Result, ValidationError};
use crate::media::DEFAULT_THUMBNAIL_FOLDER;
use crate::sequence::SequenceAssembler;

/// Settings for one scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanConfig {
    recurse_subfolders: bool,
    file_types: Option<BTreeSet<String>>,
    exclude_patterns: Vec<String>,
    combine_frame_sequences: bool,
    ignore_thumbnail_folders: bool,
    thumbnail_folder_name: String,
    min_sequence_length: usize,
    follow_links: bool,
}

impl ScanConfig {
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    pub fn recurse_subfolders(&self) -> bool {
        self.recurse_subfolders
    }

    /// Normalized extensions to accept, `None` when every file passes
    pub fn file_types(&self) -> Option<&BTreeSet<String>> {
        self.file_types.as_ref()
    }

    pub fn exclude_patterns(&self) -> &[String] {
        &self.exclude_patterns
    }

    pub fn combine_frame_sequences(&self) -> bool {
        self.combine_frame_sequences
    }

    pub fn ignore_thumbnail_folders(&self) -> bool {
        self.ignore_thumbnail_folders
    }

    pub fn thumbnail_folder_name(&self) -> &str {
        &self.thumbnail_folder_name
    }

    pub fn min_sequence_length(&self) -> usize {
        self.min_sequence_length
    }

    pub fn follow_links(&self) -> bool {
        self.follow_links
    }

    /// Discovery options derived from this configuration
    pub fn discovery_options(&self) -> DiscoveryOptions {
        let excluded: Vec<&str> = if self.ignore_thumbnail_folders {
            vec![self.thumbnail_folder_name.as_str()]
        } else {
            Vec::new()
        };

        let options = DiscoveryOptions::new()
            .with_recursive(self.recurse_subfolders)
            .with_exclude_dir_names(excluded)
            .with_exclude_patterns(self.exclude_patterns.clone())
            .with_follow_links(self.follow_links);

        match &self.file_types {
            Some(types) => options.with_extensions(types),
            None => options,
        }
    }
}

/// Builder for [`ScanConfig`]
///
/// `recurse_subfolders` and `combine_frame_sequences` have no default and
/// must be set explicitly.
#[derive(Debug, Clone)]
pub struct ScanConfigBuilder {
    recurse_subfolders: Option<bool>,
    file_types: Option<Vec<String>>,
    exclude_patterns: Vec<String>,
    combine_frame_sequences: Option<bool>,
    ignore_thumbnail_folders: bool,
    thumbnail_folder_name: String,
    min_sequence_length: usize,
    follow_links: bool,
}

impl Default for ScanConfigBuilder {
    fn default() -> Self {
        Self {
            recurse_subfolders: None,
            file_types: None,
            exclude_patterns: Vec::new(),
            combine_frame_sequences: None,
            ignore_thumbnail_folders: true,
            thumbnail_folder_name: DEFAULT_THUMBNAIL_FOLDER.to_string(),
            min_sequence_length: SequenceAssembler::DEFAULT_MIN_SEQUENCE_LENGTH,
            follow_links: false,
        }
    }
}

impl ScanConfigBuilder {
    pub fn recurse_subfolders(mut self, recurse: bool) -> Self {
        self.recurse_subfolders = Some(recurse);
        self
    }

    /// Restrict the scan to these extensions; an empty list scans everything
    pub fn file_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    /// Scan every file regardless of extension
    pub fn all_file_types(mut self) -> Self {
        self.file_types = None;
        self
    }

    pub fn exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    pub fn combine_frame_sequences(mut self, combine: bool) -> Self {
        self.combine_frame_sequences = Some(combine);
        self
    }

    pub fn ignore_thumbnail_folders(mut self, ignore: bool) -> Self {
        self.ignore_thumbnail_folders = ignore;
        self
    }

    pub fn thumbnail_folder_name(mut self, name: impl Into<String>) -> Self {
        self.thumbnail_folder_name = name.into();
        self
    }

    pub fn min_sequence_length(mut self, length: usize) -> Self {
        self.min_sequence_length = length;
        self
    }

    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Resolve and validate the configuration
    pub fn build(self) -> Result<ScanConfig> {
        let recurse_subfolders = self
            .recurse_subfolders
            .ok_or_else(|| ValidationError::unknown_configuration("recurse_subfolders"))?;
        let combine_frame_sequences = self
            .combine_frame_sequences
            .ok_or_else(|| ValidationError::unknown_configuration("combine_frame_sequences"))?;

        if self.min_sequence_length == 0 {
            return Err(ValidationError::invalid_parameter(
                "min_sequence_length",
                "must be at least 1",
            )
            .into());
        }

        if self.ignore_thumbnail_folders {
            validate_folder_name(&self.thumbnail_folder_name)?;
        }

        // Compile once here so bad patterns fail before any walking starts
        PatternMatcher::new(&self.exclude_patterns)?;

        let file_types = self
            .file_types
            .map(normalize_extensions)
            .filter(|types| !types.is_empty());

        Ok(ScanConfig {
            recurse_subfolders,
            file_types,
            exclude_patterns: self.exclude_patterns,
            combine_frame_sequences,
            ignore_thumbnail_folders: self.ignore_thumbnail_folders,
            thumbnail_folder_name: self.thumbnail_folder_name,
            min_sequence_length: self.min_sequence_length,
            follow_links: self.follow_links,
        })
    }
}

fn validate_folder_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(
            ValidationError::invalid_parameter("thumbnail_folder_name", "must not be empty").into(),
        );
    }
    if name.contains(['/', '\\']) {
        return Err(ValidationError::invalid_parameter(
            "thumbnail_folder_name",
            "must be a single folder name",
        )
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn base() -> ScanConfigBuilder {
        ScanConfig::builder()
            .recurse_subfolders(true)
            .combine_frame_sequences(true)
    }

    #[test]
    fn test_defaults() {
        let config = base().build().unwrap();

        assert!(config.recurse_subfolders());
        assert!(config.combine_frame_sequences());
        assert!(config.ignore_thumbnail_folders());
        assert_eq!(config.thumbnail_folder_name(), "thumbnails");
        assert_eq!(config.min_sequence_length(), 2);
        assert_eq!(config.file_types(), None);
        assert!(!config.follow_links());
    }

    #[test]
    fn test_unset_recursion_is_unknown() {
        let err = ScanConfig::builder()
            .combine_frame_sequences(true)
            .build()
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Validation(ValidationError::UnknownConfiguration { ref field })
                if field == "recurse_subfolders"
        ));
    }

    #[test]
    fn test_unset_combine_is_unknown() {
        let err = ScanConfig::builder()
            .recurse_subfolders(false)
            .build()
            .unwrap_err();

        assert!(err.to_string().contains("combine_frame_sequences"));
    }

    #[test]
    fn test_zero_min_length_rejected() {
        let err = base().min_sequence_length(0).build().unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_file_types_normalized() {
        let config = base().file_types(["PNG", ".Exr", "png"]).build().unwrap();
        let types: Vec<&str> = config.file_types().unwrap().iter().map(String::as_str).collect();
        assert_eq!(types, vec!["exr", "png"]);
    }

    #[test]
    fn test_empty_file_types_means_no_filter() {
        let config = base().file_types(Vec::<String>::new()).build().unwrap();
        assert_eq!(config.file_types(), None);
        assert_eq!(config.discovery_options().extensions, None);
    }

    #[test]
    fn test_invalid_glob_rejected() {
        let err = base()
            .exclude_patterns(vec!["[unclosed".to_string()])
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_bad_thumbnail_folder_rejected() {
        assert!(base().thumbnail_folder_name("").build().is_err());
        assert!(base().thumbnail_folder_name("a/b").build().is_err());
        // Not validated when thumbnails are scanned anyway
        assert!(
            base()
                .ignore_thumbnail_folders(false)
                .thumbnail_folder_name("")
                .build()
                .is_ok()
        );
    }

    #[test]
    fn test_discovery_options_exclude_thumbnails() {
        let config = base().thumbnail_folder_name(".thumbs").build().unwrap();
        let options = config.discovery_options();
        assert!(options.exclude_dir_names.contains(".thumbs"));
        assert!(options.recursive);

        let config = base().ignore_thumbnail_folders(false).build().unwrap();
        assert!(config.discovery_options().exclude_dir_names.is_empty());
    }
}
