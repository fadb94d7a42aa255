use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::foundation::error::{ExrSeqError, ExrSeqResult};

/// File extension matched when building a frame manifest.
pub const SEQUENCE_EXTENSION: &str = "exr";

/// Enumerate the frame files of `directory` in playback order.
///
/// Matching is by extension (ASCII case-insensitive), plain files only.
/// Names are sorted lexically ascending and that ordering IS the frame
/// ordering: frame index 0 is the lexically smallest name. No numeric-aware
/// sort is performed, so sequences must use a zero-padded naming convention
/// (`frame_0001.exr`, ...) to play in numeric order.
///
/// Fails with [`ExrSeqError::NoMatchingFiles`] when the directory cannot be
/// listed or contains no matching files; this aborts the open operation.
pub fn build_manifest(directory: &Path) -> ExrSeqResult<Vec<PathBuf>> {
    let mut names: Vec<OsString> = Vec::new();

    let entries = std::fs::read_dir(directory).map_err(|e| {
        ExrSeqError::no_matching_files(format!(
            "cannot list directory '{}': {e}",
            directory.display()
        ))
    })?;

    for entry in entries {
        let Ok(entry) = entry else { continue };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(SEQUENCE_EXTENSION));
        if matches {
            names.push(entry.file_name());
        }
    }

    if names.is_empty() {
        return Err(ExrSeqError::no_matching_files(format!(
            "directory '{}' contains no .{SEQUENCE_EXTENSION} image files",
            directory.display()
        )));
    }

    names.sort();

    Ok(names.into_iter().map(|n| directory.join(n)).collect())
}
