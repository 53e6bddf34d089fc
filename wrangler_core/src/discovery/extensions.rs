//! Known media file extensions
//!
//! Provides the extension groups used for media type classification and the
//! default file type filter applied when no explicit types are configured.

use std::collections::BTreeSet;

/// Image and still-frame extensions
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "tif", "tiff", "bmp", "gif", "exr", "dpx", "cin", "tga", "hdr", "sgi",
    "rgb",
];

/// Video container extensions
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "flv", "webm"];

/// Audio extensions
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "aac", "flac"];

/// File types scanned when configuration does not name any
pub const DEFAULT_FILE_TYPES: &[&str] = &["mp4", "png", "wav", "jpg"];

/// Normalize an extension for comparison: strip leading dots and lowercase
///
/// `"PNG"`, `".png"` and `"png"` all normalize to `"png"`.
pub fn normalize_extension(extension: &str) -> String {
    extension.trim_start_matches('.').to_lowercase()
}

/// Build a normalized extension set, dropping entries that are empty after
/// normalization
pub fn normalize_extensions<I, S>(extensions: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    extensions
        .into_iter()
        .map(|ext| normalize_extension(ext.as_ref()))
        .filter(|ext| !ext.is_empty())
        .collect()
}
