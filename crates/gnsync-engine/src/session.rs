use std::path::PathBuf;

use anyhow::Result;
use gnsync_store::NoteStore;
use tracing::info;

use crate::content::ContentConverter;
use crate::notebook::resolve_notebook;
use crate::reconcile::{ReconcileOptions, Reconciler};
use crate::report::{FileReport, SyncReport};
use crate::scanner::{list_files, resolve_sync_dir};

/// One sync run's inputs.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    pub dir: Option<PathBuf>,
    pub mask: String,
    /// Target notebook; defaults to the directory's base name.
    pub notebook: Option<String>,
    pub strict_titles: bool,
}

/// Push every file of the request's directory that matches its mask.
///
/// Setup failures (directory, mask, notebook) abort before any file is
/// touched and come back as [`gnsync_core::SyncError`] inside the error.
/// Per-file failures are only recorded in the returned report.
pub async fn sync_directory(
    store: &dyn NoteStore,
    converter: &dyn ContentConverter,
    request: &SyncRequest,
    on_file: impl Fn(&FileReport) + Send + Sync + 'static,
) -> Result<SyncReport> {
    let dir = resolve_sync_dir(request.dir.as_deref())?;
    let files = list_files(&dir, &request.mask)?;
    info!(
        dir = %dir.display(),
        mask = %request.mask,
        files = files.len(),
        "scanned sync directory"
    );

    let notebook = resolve_notebook(store, request.notebook.as_deref(), &dir).await?;
    let options = ReconcileOptions {
        notebook_guid: Some(notebook.guid),
        strict_titles: request.strict_titles,
    };

    let report = Reconciler::new(store, converter, options)
        .with_progress(on_file)
        .run(&files)
        .await;
    Ok(report)
}
