use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Check if a file should be treated as a nested archive by its extension
///
/// Matching is case-insensitive against the configured extension list
/// (without dots), so `Core.ZIP` matches a configured `zip`.
pub fn is_archive(path: &Path, archive_extensions: &[String]) -> bool {
    if let Some(ext) = path.extension() {
        let ext_str = ext.to_string_lossy().to_lowercase();
        archive_extensions
            .iter()
            .any(|ae| ae.to_lowercase() == ext_str)
    } else {
        false
    }
}

/// Check an entry name against the include filters
///
/// An empty filter set matches everything; otherwise the name must contain
/// at least one filter substring, compared case-insensitively.
pub fn matches_filters(entry_name: &str, filters: &[String]) -> bool {
    if filters.is_empty() {
        return true;
    }
    let name_lower = entry_name.to_lowercase();
    filters
        .iter()
        .any(|filter| name_lower.contains(&filter.to_lowercase()))
}

/// Derive the sibling destination directory for an archive
///
/// The directory sits next to the archive and carries its basename with the
/// extension stripped: `/out/Core/core.zip` extracts into `/out/Core/core`.
/// This is both the derived-destination policy for top-level requests and the
/// fixed destination rule for nested archives.
pub fn derived_destination(archive_path: &Path) -> Result<PathBuf> {
    let stem = archive_path
        .file_stem()
        .ok_or_else(|| Error::InvalidPath {
            path: archive_path.to_path_buf(),
            reason: "archive path has no file name to derive a destination from".into(),
        })?;

    match archive_path.parent() {
        Some(parent) => Ok(parent.join(stem)),
        None => Ok(PathBuf::from(stem)),
    }
}
