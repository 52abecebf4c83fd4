use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Utc};
use gnsync_core::SyncError;
use tracing::warn;

/// A candidate file found in the sync directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub path: PathBuf,
    /// File name with the extension stripped; becomes the note title.
    pub name: String,
    /// Modification time in epoch milliseconds.
    pub mtime_ms: Option<i64>,
}

/// Check the sync directory and return its canonical form.
pub fn resolve_sync_dir(path: Option<&Path>) -> Result<PathBuf, SyncError> {
    let path = path
        .filter(|path| !path.as_os_str().is_empty())
        .ok_or(SyncError::PathNotSelected)?;
    if !path.exists() {
        return Err(SyncError::PathNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(SyncError::NotADirectory(path.to_path_buf()));
    }
    Ok(fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()))
}

/// List regular files in `dir` matching the glob `mask`, most recently
/// modified first.
pub fn list_files(dir: &Path, mask: &str) -> Result<Vec<ScannedFile>> {
    let pattern = format!("{}/{}", glob::Pattern::escape(&dir.to_string_lossy()), mask);
    let entries = glob::glob(&pattern).map_err(|_| SyncError::InvalidMask(mask.to_string()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = match entry {
            Ok(path) => path,
            Err(err) => {
                warn!(path = %err.path().display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };
        // Dangling symlinks and files removed since the glob are skipped.
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "skipping entry that cannot be stat'ed"
                );
                continue;
            }
        };
        if !metadata.is_file() {
            continue;
        }

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mtime_ms = metadata
            .modified()
            .ok()
            .map(|modified| DateTime::<Utc>::from(modified).timestamp_millis());

        files.push(ScannedFile {
            path,
            name,
            mtime_ms,
        });
    }

    files.sort_by(|a, b| {
        b.mtime_ms
            .cmp(&a.mtime_ms)
            .then_with(|| a.path.cmp(&b.path))
    });
    Ok(files)
}
