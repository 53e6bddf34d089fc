//! Output locations for generated thumbnails

use std::path::{Path, PathBuf};

/// Folder thumbnails are written to, next to their source
pub const DEFAULT_THUMBNAIL_FOLDER: &str = "thumbnails";

pub const DEFAULT_THUMBNAIL_SUFFIX: &str = "_thumb";

/// Thumbnail path for `file`: `<parent>/<folder_name>/<stem><suffix>.png`
///
/// Writing under `folder_name` keeps thumbnails out of later scans that
/// exclude that folder.
pub fn thumbnail_path(file: &Path, folder_name: &str, suffix: &str) -> PathBuf {
    let parent = file.parent().unwrap_or_else(|| Path::new(""));
    let stem = file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    parent.join(folder_name).join(format!("{stem}{suffix}.png"))
}
