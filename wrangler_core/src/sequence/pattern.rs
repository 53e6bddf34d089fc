//! Frame number extraction from file names
//!
//! A name is a frame candidate when it reads `<base><sep><digits><ext>`:
//! a non-empty base, exactly one separator out of `.`, `_` and `-`, an ASCII
//! digit run, and a non-empty final extension. The digit run is taken to be
//! as long as possible, which makes the base the longest valid prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::discovery::FileEntry;

/// Character joining a base name to its frame number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Separator {
    #[serde(rename = ".")]
    Dot,
    #[serde(rename = "_")]
    Underscore,
    #[serde(rename = "-")]
    Hyphen,
}

impl Separator {
    /// Used when a separator has to be rebuilt without ever being captured
    pub const FALLBACK: Separator = Separator::Dot;

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Self::Dot),
            '_' => Some(Self::Underscore),
            '-' => Some(Self::Hyphen),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Dot => '.',
            Self::Underscore => '_',
            Self::Hyphen => '-',
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Components of a file name that parsed as a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameMatch {
    /// Everything before the separator
    pub base: String,
    pub separator: Separator,
    /// Parsed frame number, leading zeros dropped
    pub frame: u64,
    /// Width of the digit run as written, leading zeros included
    pub padding: usize,
    /// Final extension including its dot, case preserved
    pub extension: String,
}

impl FrameMatch {
    /// Rebuild the exact file name this match was parsed from
    pub fn file_name(&self) -> String {
        frame_file_name(
            &self.base,
            self.separator,
            self.frame,
            self.padding,
            &self.extension,
        )
    }
}

/// Outcome of matching one file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    NoMatch,
    Matched(FrameMatch),
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    pub fn into_match(self) -> Option<FrameMatch> {
        match self {
            Self::Matched(m) => Some(m),
            Self::NoMatch => None,
        }
    }
}

/// Match the file name of a discovered entry
///
/// Names that are not valid UTF-8 never match.
pub fn match_entry(entry: &FileEntry) -> MatchResult {
    entry
        .file_name()
        .map_or(MatchResult::NoMatch, match_file_name)
}

/// Match a bare file name
pub fn match_file_name(name: &str) -> MatchResult {
    parse(name).map_or(MatchResult::NoMatch, MatchResult::Matched)
}

fn parse(name: &str) -> Option<FrameMatch> {
    let ext_start = name.rfind('.')?;
    let extension = &name[ext_start..];
    if extension.len() < 2 {
        return None;
    }

    let stem = &name[..ext_start];
    let digits_start = stem
        .bytes()
        .rposition(|b| !b.is_ascii_digit())
        .map_or(0, |pos| pos + 1);
    let digits = &stem[digits_start..];
    if digits.is_empty() || digits_start == 0 {
        return None;
    }

    // Byte before the digit run is ASCII when it is a separator, so slicing
    // around it stays on char boundaries.
    let separator_pos = digits_start - 1;
    let separator = Separator::from_char(char::from(stem.as_bytes()[separator_pos]))?;
    let base = &stem[..separator_pos];
    if base.is_empty() {
        return None;
    }

    let frame = digits.parse::<u64>().ok()?;

    Some(FrameMatch {
        base: base.to_string(),
        separator,
        frame,
        padding: digits.len(),
        extension: extension.to_string(),
    })
}

/// Format a frame number zero-padded to `padding` digits
pub fn format_frame(frame: u64, padding: usize) -> String {
    format!("{frame:0padding$}")
}

/// Build `<base><sep><padded frame><ext>`
pub fn frame_file_name(
    base: &str,
    separator: Separator,
    frame: u64,
    padding: usize,
    extension: &str,
) -> String {
    format!(
        "{base}{}{}{extension}",
        separator.as_char(),
        format_frame(frame, padding)
    )
}
