//! Finalized frame sequences and their grouping key

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::pattern::{FrameMatch, Separator, format_frame, frame_file_name};
use crate::error::ScanWarning;

/// Identity of a candidate sequence
///
/// The separator is deliberately left out, so frames that only differ in
/// separator land on the same key and are resolved by the assembler.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SequenceKey {
    pub folder: PathBuf,
    pub base: String,
    pub extension: String,
}

impl SequenceKey {
    pub fn new(folder: impl Into<PathBuf>, base: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            base: base.into(),
            extension: extension.into(),
        }
    }

    pub(crate) fn from_match(folder: &Path, frame: &FrameMatch) -> Self {
        Self::new(folder, frame.base.as_str(), frame.extension.as_str())
    }
}

/// A promoted frame sequence
///
/// Frames are ascending and unique. The separator is always present for
/// groups built by the assembler; it can only be missing on groups read back
/// from external records.
///
/// Members may disagree on separator and zero-padding, so the assembler
/// records each member's own file name. Frames without a recorded name are
/// rebuilt from the retained separator and padding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SequenceGroupRecord")]
pub struct SequenceGroup {
    folder: PathBuf,
    basename: String,
    extension: String,
    separator: Option<Separator>,
    padding: usize,
    frames: Vec<u64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    member_names: BTreeMap<u64, String>,
    total_size: u64,
}

/// Wire shape accepted when deserializing a group
///
/// Older records used `ext` and carried neither padding nor separator.
#[derive(Deserialize)]
struct SequenceGroupRecord {
    folder: PathBuf,
    basename: String,
    #[serde(alias = "ext")]
    extension: String,
    #[serde(default)]
    separator: Option<Separator>,
    #[serde(default)]
    padding: usize,
    frames: Vec<u64>,
    #[serde(default)]
    member_names: BTreeMap<u64, String>,
    #[serde(default)]
    total_size: u64,
}

impl From<SequenceGroupRecord> for SequenceGroup {
    fn from(record: SequenceGroupRecord) -> Self {
        Self::from_parts(
            SequenceKey::new(record.folder, record.basename, record.extension),
            record.separator,
            record.padding,
            record.frames,
            record.total_size,
        )
        .with_member_names(record.member_names)
    }
}

impl SequenceGroup {
    /// Build a group from its parts, sorting and deduplicating the frames
    pub fn from_parts(
        key: SequenceKey,
        separator: Option<Separator>,
        padding: usize,
        frames: impl IntoIterator<Item = u64>,
        total_size: u64,
    ) -> Self {
        let mut frames: Vec<u64> = frames.into_iter().collect();
        frames.sort_unstable();
        frames.dedup();

        Self {
            folder: key.folder,
            basename: key.base,
            extension: key.extension,
            separator,
            padding,
            frames,
            member_names: BTreeMap::new(),
            total_size,
        }
    }

    /// Record the file names members were discovered under
    ///
    /// Names for frames outside the group are dropped.
    pub fn with_member_names(mut self, names: impl IntoIterator<Item = (u64, String)>) -> Self {
        self.member_names = names
            .into_iter()
            .filter(|(frame, _)| self.frames.binary_search(frame).is_ok())
            .collect();
        self
    }

    pub fn key(&self) -> SequenceKey {
        SequenceKey::new(&self.folder, self.basename.as_str(), self.extension.as_str())
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn basename(&self) -> &str {
        &self.basename
    }

    /// Member extension including its dot, e.g. `.exr`
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Separator of the first member in path order
    pub fn separator(&self) -> Option<Separator> {
        self.separator
    }

    /// Digit width of the first frame, used for the display name
    pub fn padding(&self) -> usize {
        self.padding
    }

    pub fn frames(&self) -> &[u64] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn start_frame(&self) -> Option<u64> {
        self.frames.first().copied()
    }

    pub fn end_frame(&self) -> Option<u64> {
        self.frames.last().copied()
    }

    /// Representative frame, `frames[len / 2]`
    pub fn middle_frame(&self) -> Option<u64> {
        self.frames.get(self.frames.len() / 2).copied()
    }

    /// Sum of member sizes in bytes
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Warning for a group that has to fall back to the default separator
    pub fn ambiguity(&self) -> Option<ScanWarning> {
        match self.separator {
            Some(_) => None,
            None => Some(ScanWarning::AmbiguousSeparator {
                folder: self.folder.clone(),
                base: self.basename.clone(),
                fallback: Separator::FALLBACK.as_char(),
            }),
        }
    }

    fn effective_separator(&self) -> Separator {
        match self.separator {
            Some(separator) => separator,
            None => {
                if let Some(warning) = self.ambiguity() {
                    warning.log();
                }
                Separator::FALLBACK
            }
        }
    }

    /// File name of one member frame
    pub fn frame_file_name(&self, frame: u64) -> String {
        if let Some(name) = self.member_names.get(&frame) {
            return name.clone();
        }

        frame_file_name(
            &self.basename,
            self.effective_separator(),
            frame,
            self.padding,
            &self.extension,
        )
    }

    /// Path of one member frame
    pub fn frame_path(&self, frame: u64) -> PathBuf {
        self.folder.join(self.frame_file_name(frame))
    }

    /// Paths of every member, in frame order
    pub fn member_paths(&self) -> Vec<PathBuf> {
        self.frames
            .iter()
            .map(|&frame| self.frame_path(frame))
            .collect()
    }

    /// Path of the middle frame, used for thumbnails
    pub fn representative_path(&self) -> Option<PathBuf> {
        self.middle_frame().map(|frame| self.frame_path(frame))
    }

    /// Logical name, e.g. `shot_[001-240].exr`
    pub fn display_name(&self) -> String {
        let separator = self.separator.unwrap_or(Separator::FALLBACK);
        let range = match (self.start_frame(), self.end_frame()) {
            (Some(start), Some(end)) => format!(
                "{}-{}",
                format_frame(start, self.padding),
                format_frame(end, self.padding)
            ),
            _ => String::new(),
        };
        format!("{}{}[{range}]{}", self.basename, separator.as_char(), self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shot_group(frames: &[u64]) -> SequenceGroup {
        SequenceGroup::from_parts(
            SequenceKey::new("/renders", "shot", ".exr"),
            Some(Separator::Underscore),
            3,
            frames.iter().copied(),
            0,
        )
    }

    #[test]
    fn test_frames_sorted_and_unique() {
        let group = shot_group(&[3, 1, 2, 2]);
        assert_eq!(group.frames(), &[1, 2, 3]);
        assert_eq!(group.frame_count(), 3);
        assert_eq!(group.start_frame(), Some(1));
        assert_eq!(group.end_frame(), Some(3));
    }

    #[test]
    fn test_middle_frame_uses_integer_division() {
        assert_eq!(shot_group(&[1, 2, 3]).middle_frame(), Some(2));
        assert_eq!(shot_group(&[1, 2, 3, 4]).middle_frame(), Some(3));
        assert_eq!(shot_group(&[7]).middle_frame(), Some(7));
        assert_eq!(shot_group(&[]).middle_frame(), None);
    }

    #[test]
    fn test_member_paths_keep_separator_and_padding() {
        let group = shot_group(&[1, 2, 10]);
        assert_eq!(
            group.member_paths(),
            vec![
                PathBuf::from("/renders/shot_001.exr"),
                PathBuf::from("/renders/shot_002.exr"),
                PathBuf::from("/renders/shot_010.exr"),
            ]
        );
        assert_eq!(
            group.representative_path(),
            Some(PathBuf::from("/renders/shot_002.exr"))
        );
    }

    #[test]
    fn test_recorded_names_win_over_rebuilt_ones() {
        let group = shot_group(&[9, 10, 11]).with_member_names([
            (9, "shot.9.exr".to_string()),
            (10, "shot_10.exr".to_string()),
            (42, "shot_42.exr".to_string()),
        ]);

        assert_eq!(
            group.member_paths(),
            vec![
                PathBuf::from("/renders/shot.9.exr"),
                PathBuf::from("/renders/shot_10.exr"),
                PathBuf::from("/renders/shot_011.exr"),
            ]
        );
        assert_eq!(group.frame_file_name(42), "shot_042.exr");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(shot_group(&[1, 240]).display_name(), "shot_[001-240].exr");
    }

    #[test]
    fn test_missing_separator_falls_back_to_dot() {
        let group = SequenceGroup::from_parts(
            SequenceKey::new("/renders", "shot", ".exr"),
            None,
            0,
            [5, 6],
            0,
        );

        assert!(matches!(
            group.ambiguity(),
            Some(ScanWarning::AmbiguousSeparator { fallback: '.', .. })
        ));
        assert_eq!(group.frame_path(5), PathBuf::from("/renders/shot.5.exr"));
        assert!(shot_group(&[1]).ambiguity().is_none());
    }

    #[test]
    fn test_deserialize_legacy_record() {
        let json = r#"{"folder":"/r","basename":"plate","ext":".dpx","frames":[3,1,2]}"#;
        let group: SequenceGroup = serde_json::from_str(json).unwrap();

        assert_eq!(group.extension(), ".dpx");
        assert_eq!(group.separator(), None);
        assert_eq!(group.frames(), &[1, 2, 3]);
    }

    #[test]
    fn test_serialize_round_trip() {
        let group = shot_group(&[1, 2]).with_member_names([(2, "shot_2.exr".to_string())]);
        let json = serde_json::to_string(&group).unwrap();
        let back: SequenceGroup = serde_json::from_str(&json).unwrap();
        assert_eq!(back, group);
    }
}
