use std::path::PathBuf;

use gnsync_core::FileStatus;

/// Result of one file's pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub title: String,
    pub path: PathBuf,
    pub status: FileStatus,
    /// The sync header was rewritten into the file.
    pub wrote_back: bool,
}

impl FileReport {
    /// The line printed for this file while the run progresses.
    pub fn status_line(&self) -> String {
        if self.wrote_back {
            format!("{} {}; updated with EvernoteGUID", self.title, self.status)
        } else {
            format!("{} {}", self.title, self.status)
        }
    }
}

/// Per-file outcomes of a run, in processing order.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    files: Vec<FileReport>,
}

impl SyncReport {
    pub fn push(&mut self, report: FileReport) {
        self.files.push(report);
    }

    pub fn files(&self) -> &[FileReport] {
        &self.files
    }

    pub fn count(&self, status: &FileStatus) -> usize {
        self.files
            .iter()
            .filter(|file| match status {
                FileStatus::Failed(_) => file.status.is_failure(),
                other => file.status == *other,
            })
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|file| file.status.is_failure())
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} file(s): {} created, {} updated, {} up to date, {} skipped, {} failed",
            self.files.len(),
            self.count(&FileStatus::Created),
            self.count(&FileStatus::Updated),
            self.count(&FileStatus::UpToDate),
            self.count(&FileStatus::Skipped),
            self.count(&FileStatus::Failed(String::new())),
        )
    }
}
