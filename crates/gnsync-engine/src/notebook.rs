use std::path::Path;

use gnsync_core::SyncError;
use gnsync_store::{NoteStore, Notebook};
use tracing::info;

/// Notebook name used when none is given: the sync directory's base name.
pub fn default_notebook_name(dir: &Path) -> String {
    let resolved = std::fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
    resolved
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| resolved.to_string_lossy().into_owned())
}

/// Find the target notebook by exact name, creating it when missing.
///
/// Every failure here aborts the run: there is nowhere to file new notes.
pub async fn resolve_notebook(
    store: &dyn NoteStore,
    name: Option<&str>,
    dir: &Path,
) -> Result<Notebook, SyncError> {
    let name = name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| default_notebook_name(dir));

    let unavailable = |reason: String| SyncError::NotebookUnavailable {
        name: name.clone(),
        reason,
    };

    let notebooks = store
        .list_notebooks()
        .await
        .map_err(|err| unavailable(err.to_string()))?;
    if let Some(existing) = notebooks.into_iter().find(|notebook| notebook.name == name) {
        return Ok(existing);
    }

    let created = store
        .create_notebook(&name)
        .await
        .map_err(|err| unavailable(err.to_string()))?;
    info!(
        notebook = %created.name,
        guid = %created.guid,
        "Notebook \"{}\" was created",
        created.name
    );
    Ok(created)
}
