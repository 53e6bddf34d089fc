//! Grouping of matched frames into sequences
//!
//! Entries are visited in ascending path order. Matched entries accumulate
//! in a candidate per [`SequenceKey`], keeping their own file names, so a run
//! may mix separators and digit widths. The first entry in path order fixes
//! the separator reported for the group. Only a second entry for a frame
//! number already taken is split off. Once every entry is seen, candidates
//! that reach the minimum length are promoted and the rest are split back
//! into standalone files.

use std::collections::BTreeMap;

use super::group::{SequenceGroup, SequenceKey};
use super::pattern::{FrameMatch, MatchResult, Separator, match_entry};
use crate::discovery::FileEntry;
use crate::error::{ConflictReason, Result, ScanWarning, ValidationError};

/// Raw assembler output before materialization
#[derive(Debug, Default)]
pub struct Assembly {
    pub sequences: Vec<SequenceGroup>,
    pub standalone: Vec<FileEntry>,
    pub warnings: Vec<ScanWarning>,
    /// Frames returned to standalone files by the threshold
    pub demoted: usize,
}

/// Groups discovered entries into frame sequences
#[derive(Debug, Clone, Copy)]
pub struct SequenceAssembler {
    min_sequence_length: usize,
}

impl Default for SequenceAssembler {
    fn default() -> Self {
        Self {
            min_sequence_length: Self::DEFAULT_MIN_SEQUENCE_LENGTH,
        }
    }
}

impl SequenceAssembler {
    pub const DEFAULT_MIN_SEQUENCE_LENGTH: usize = 2;

    /// Create an assembler promoting groups of at least `min_sequence_length`
    pub fn new(min_sequence_length: usize) -> Result<Self> {
        if min_sequence_length == 0 {
            return Err(ValidationError::invalid_parameter(
                "min_sequence_length",
                "must be at least 1",
            )
            .into());
        }

        Ok(Self {
            min_sequence_length,
        })
    }

    pub fn min_sequence_length(&self) -> usize {
        self.min_sequence_length
    }

    pub fn assemble(&self, mut entries: Vec<FileEntry>) -> Assembly {
        entries.sort();

        let mut assembly = Assembly::default();
        let mut candidates: BTreeMap<SequenceKey, SequenceCandidate> = BTreeMap::new();

        for entry in entries {
            let frame = match match_entry(&entry) {
                MatchResult::Matched(frame) => frame,
                MatchResult::NoMatch => {
                    assembly.standalone.push(entry);
                    continue;
                }
            };

            let key = SequenceKey::from_match(entry.folder(), &frame);
            let candidate = candidates
                .entry(key)
                .or_insert_with(|| SequenceCandidate::new(&frame));

            if let Err(reason) = candidate.accept(&frame, &entry) {
                let warning = ScanWarning::FrameConflict {
                    path: entry.path.clone(),
                    reason,
                };
                warning.log();
                assembly.warnings.push(warning);
                assembly.standalone.push(entry);
            }
        }

        for (key, candidate) in candidates {
            if candidate.len() >= self.min_sequence_length {
                assembly.sequences.push(candidate.promote(key));
            } else {
                log::debug!(
                    "Demoting {} frame(s) of {}{} in {}",
                    candidate.len(),
                    key.base,
                    key.extension,
                    key.folder.display()
                );
                assembly.demoted += candidate.len();
                assembly.standalone.extend(candidate.demote());
            }
        }

        log::debug!(
            "Assembled {} sequence(s), {} standalone file(s), {} demoted frame(s)",
            assembly.sequences.len(),
            assembly.standalone.len(),
            assembly.demoted
        );

        assembly
    }
}

/// One accepted frame with the name it was found under
#[derive(Debug)]
struct CandidateMember {
    entry: FileEntry,
    file_name: String,
    padding: usize,
}

/// Frames accumulated for one key
#[derive(Debug)]
struct SequenceCandidate {
    separator: Separator,
    members: BTreeMap<u64, CandidateMember>,
}

impl SequenceCandidate {
    fn new(first: &FrameMatch) -> Self {
        Self {
            separator: first.separator,
            members: BTreeMap::new(),
        }
    }

    fn len(&self) -> usize {
        self.members.len()
    }

    /// Accept a frame unless its number is already taken
    fn accept(
        &mut self,
        frame: &FrameMatch,
        entry: &FileEntry,
    ) -> std::result::Result<(), ConflictReason> {
        if self.members.contains_key(&frame.frame) {
            return Err(ConflictReason::DuplicateFrame { frame: frame.frame });
        }

        if frame.separator != self.separator {
            log::debug!(
                "{} uses separator '{}', group keeps '{}'",
                entry.path.display(),
                frame.separator.as_char(),
                self.separator.as_char()
            );
        }

        self.members.insert(
            frame.frame,
            CandidateMember {
                entry: entry.clone(),
                file_name: frame.file_name(),
                padding: frame.padding,
            },
        );
        Ok(())
    }

    fn promote(self, key: SequenceKey) -> SequenceGroup {
        let total_size = self.members.values().map(|member| member.entry.size).sum();
        let padding = self
            .members
            .values()
            .next()
            .map_or(0, |member| member.padding);
        let names: Vec<(u64, String)> = self
            .members
            .iter()
            .map(|(&frame, member)| (frame, member.file_name.clone()))
            .collect();

        SequenceGroup::from_parts(
            key,
            Some(self.separator),
            padding,
            self.members.into_keys(),
            total_size,
        )
        .with_member_names(names)
    }

    fn demote(self) -> impl Iterator<Item = FileEntry> {
        self.members.into_values().map(|member| member.entry)
    }
}
