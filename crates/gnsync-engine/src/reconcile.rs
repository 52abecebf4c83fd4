//! Per-file reconciliation: classify each file, push it, write the sync
//! header back.
//!
//! Files are processed one at a time in scan order. A failing file is
//! recorded in the report and never stops the files after it.

use std::collections::HashSet;

use chrono::{DateTime, Local};
use gnsync_core::{FileStatus, SyncError};
use gnsync_store::{NewNote, Note, NoteAttributes, NoteStore};
use tracing::{debug, error, info, warn};

use crate::content::ContentConverter;
use crate::meta::inject;
use crate::record::SourceRecord;
use crate::report::{FileReport, SyncReport};
use crate::scanner::ScannedFile;

/// `source_application` attribute of every note created by a sync run.
pub const SOURCE_APPLICATION: &str = "gnsync";

type Clock = Box<dyn Fn() -> DateTime<Local> + Send + Sync>;
type Progress = Box<dyn Fn(&FileReport) + Send + Sync>;

/// What a dirty or clean file needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncDecision {
    /// Not modified since the last push.
    Skip,
    /// No remote note matched; create one.
    Create,
    /// Matched a note older than the file; overwrite it.
    Update(Note),
    /// Matched a note at least as new as the file; leave both sides alone.
    Unchanged(Note),
}

/// A file is dirty when it was never pushed, has no mtime, or was modified
/// after its last push.
pub fn is_dirty(record: &SourceRecord) -> bool {
    match (record.pushed_at_ms, record.mtime_ms) {
        (Some(pushed_at), Some(mtime)) => mtime > pushed_at,
        _ => true,
    }
}

/// Classify `record` given the remote note its identifier matched, if any.
pub fn decide(record: &SourceRecord, remote: Option<Note>) -> SyncDecision {
    if !is_dirty(record) {
        return SyncDecision::Skip;
    }
    match remote {
        None => SyncDecision::Create,
        Some(note) if is_newer_than(record, &note) => SyncDecision::Update(note),
        Some(note) => SyncDecision::Unchanged(note),
    }
}

fn is_newer_than(record: &SourceRecord, note: &Note) -> bool {
    record.mtime_ms.is_none_or(|mtime| mtime > note.updated)
}

#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    /// Notebook every created note is filed under.
    pub notebook_guid: Option<String>,
    /// Refuse a second create of the same title within one run.
    pub strict_titles: bool,
}

pub struct Reconciler<'a> {
    store: &'a dyn NoteStore,
    converter: &'a dyn ContentConverter,
    options: ReconcileOptions,
    clock: Clock,
    progress: Option<Progress>,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        store: &'a dyn NoteStore,
        converter: &'a dyn ContentConverter,
        options: ReconcileOptions,
    ) -> Self {
        Self {
            store,
            converter,
            options,
            clock: Box::new(Local::now),
            progress: None,
        }
    }

    /// Clock used for the `EvernoteUpdate` stamp.
    pub fn with_clock(
        mut self,
        clock: impl Fn() -> DateTime<Local> + Send + Sync + 'static,
    ) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Called with each file's report as soon as the file is done.
    pub fn with_progress(mut self, progress: impl Fn(&FileReport) + Send + Sync + 'static) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    pub async fn run(&self, files: &[ScannedFile]) -> SyncReport {
        info!(files = files.len(), "Sync Start");

        let mut report = SyncReport::default();
        let mut created_titles = HashSet::new();
        for file in files {
            let file_report = match self.sync_file(file, &mut created_titles).await {
                Ok(file_report) => file_report,
                Err(err) => {
                    error!(path = %file.path.display(), error = %err, "file sync failed");
                    FileReport {
                        title: file.name.clone(),
                        path: file.path.clone(),
                        status: FileStatus::Failed(err.to_string()),
                        wrote_back: false,
                    }
                }
            };
            if let Some(progress) = &self.progress {
                progress(&file_report);
            }
            report.push(file_report);
        }

        info!(summary = %report.summary(), "Sync Complete");
        report
    }

    async fn sync_file(
        &self,
        file: &ScannedFile,
        created_titles: &mut HashSet<String>,
    ) -> Result<FileReport, SyncError> {
        let record = SourceRecord::load(file, self.converter)?;

        // Clean files never reach the store.
        if !is_dirty(&record) {
            debug!(title = %record.title, "not modified since last push");
            return Ok(file_report(&record, FileStatus::Skipped, false));
        }

        let remote = self.match_note(&record).await;
        match decide(&record, remote) {
            SyncDecision::Skip => Ok(file_report(&record, FileStatus::Skipped, false)),
            SyncDecision::Unchanged(note) => {
                debug!(title = %record.title, guid = %note.guid, "remote note is newer or equal");
                Ok(file_report(&record, FileStatus::UpToDate, false))
            }
            SyncDecision::Create => {
                if self.options.strict_titles && created_titles.contains(&record.title) {
                    return Err(SyncError::DuplicateTitle {
                        title: record.title.clone(),
                    });
                }
                let note = self.create_note(&record).await?;
                created_titles.insert(record.title.clone());
                let wrote_back = self.write_back(&record, &note.guid)?;
                Ok(file_report(&record, FileStatus::Created, wrote_back))
            }
            SyncDecision::Update(note) => {
                let note = self.update_note(&record, note).await?;
                let wrote_back = self.write_back(&record, &note.guid)?;
                Ok(file_report(&record, FileStatus::Updated, wrote_back))
            }
        }
    }

    /// Fetch the note named by the file's identifier. Any failure, including
    /// a note deleted remotely, counts as "no match".
    async fn match_note(&self, record: &SourceRecord) -> Option<Note> {
        let guid = record.remote_id.as_deref()?;
        match self.store.get_note(guid).await {
            Ok(note) => Some(note),
            Err(err) if err.is_not_found() => {
                warn!(title = %record.title, guid, "remote note not found; creating a new one");
                None
            }
            Err(err) => {
                warn!(
                    title = %record.title,
                    guid,
                    error = %err,
                    "remote lookup failed; creating a new note"
                );
                None
            }
        }
    }

    async fn create_note(&self, record: &SourceRecord) -> Result<Note, SyncError> {
        let source = record
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| record.title.clone());
        let new_note = NewNote {
            title: record.title.clone(),
            content: record.content.clone(),
            notebook_guid: self.options.notebook_guid.clone(),
            created: record.created_ms(),
            attributes: NoteAttributes {
                source_application: Some(SOURCE_APPLICATION.to_string()),
                source: Some(source),
            },
        };

        let note = self
            .store
            .create_note(new_note)
            .await
            .map_err(|err| SyncError::CreateFailed {
                file: record.title.clone(),
                reason: err.to_string(),
            })?;
        info!(guid = %note.guid, "Note \"{}\" was created", record.title);
        Ok(note)
    }

    async fn update_note(&self, record: &SourceRecord, mut note: Note) -> Result<Note, SyncError> {
        note.title = record.title.clone();
        note.content = record.content.clone();
        note.updated = record
            .mtime_ms
            .unwrap_or_else(|| (self.clock)().timestamp_millis());
        note.created = record.created_ms();

        let note = self
            .store
            .update_note(&note)
            .await
            .map_err(|err| SyncError::UpdateFailed {
                title: record.title.clone(),
                reason: err.to_string(),
            })?;
        info!(guid = %note.guid, "Note \"{}\" was updated", record.title);
        Ok(note)
    }

    /// Rewrite the file with the refreshed sync header. Returns whether the
    /// file changed.
    fn write_back(&self, record: &SourceRecord, guid: &str) -> Result<bool, SyncError> {
        let Some(text) = inject(&record.header, &record.body, guid, (self.clock)()) else {
            return Ok(false);
        };
        if text == record.raw_content {
            return Ok(false);
        }
        std::fs::write(&record.path, text).map_err(|err| SyncError::WriteBack {
            file: record.title.clone(),
            reason: err.to_string(),
        })?;
        Ok(true)
    }
}

fn file_report(record: &SourceRecord, status: FileStatus, wrote_back: bool) -> FileReport {
    FileReport {
        title: record.title.clone(),
        path: record.path.clone(),
        status,
        wrote_back,
    }
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
