//! Top-level directory listing.

use crate::error::{OrganizeError, OrganizeResult};
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

/// Lists the regular files directly inside `directory`, sorted by name.
///
/// Subdirectories and symlinks are not returned and nothing is recursed into.
/// An entry whose name equals `exclude` (the move log) is left out. Names that
/// are not valid UTF-8 cannot be recorded in the move log, so they are skipped
/// with a warning.
///
/// # Errors
///
/// Returns [`OrganizeError::NotADirectory`] if `directory` does not exist or is
/// not a directory, and [`OrganizeError::ReadDirFailed`] if it cannot be read.
pub fn list_files(directory: &Path, exclude: Option<&OsStr>) -> OrganizeResult<Vec<String>> {
    if !directory.is_dir() {
        return Err(OrganizeError::NotADirectory {
            path: directory.to_path_buf(),
        });
    }

    let entries = fs::read_dir(directory).map_err(|e| OrganizeError::ReadDirFailed {
        path: directory.to_path_buf(),
        source: e,
    })?;

    let mut names = Vec::new();
    for entry in entries.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if !file_type.is_file() {
            continue;
        }

        let name = entry.file_name();
        if exclude.is_some_and(|excluded| excluded == name.as_os_str()) {
            continue;
        }

        match name.into_string() {
            Ok(name) => names.push(name),
            Err(raw) => {
                tracing::warn!(name = ?raw, "skipping file with a non UTF-8 name");
            }
        }
    }

    names.sort();
    Ok(names)
}
