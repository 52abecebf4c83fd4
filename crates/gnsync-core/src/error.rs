use std::path::PathBuf;

/// Errors raised by a sync run.
///
/// Setup variants abort the run before any file is touched. File-scoped
/// variants are caught at the per-file boundary and recorded in the report.
#[derive(thiserror::Error, Debug)]
pub enum SyncError {
    #[error("Auth error. There is not any access token")]
    MissingAuth,

    #[error("Path to sync directory is not selected")]
    PathNotSelected,

    #[error("Path to sync directory does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Path to sync directory is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Invalid file mask '{0}'")]
    InvalidMask(String),

    #[error("Notebook \"{name}\" was not created: {reason}")]
    NotebookUnavailable { name: String, reason: String },

    #[error("File {file}. Content must be UTF-8 encoded")]
    InvalidEncoding { file: String },

    #[error("Failed to read \"{file}\": {reason}")]
    Unreadable { file: String, reason: String },

    #[error("Note \"{file}\" was not created: {reason}")]
    CreateFailed { file: String, reason: String },

    #[error("Note \"{title}\" was not updated: {reason}")]
    UpdateFailed { title: String, reason: String },

    #[error("Failed to write metadata back to \"{file}\": {reason}")]
    WriteBack { file: String, reason: String },

    #[error("Note \"{title}\" was already created in this run")]
    DuplicateTitle { title: String },
}

impl SyncError {
    /// True for errors that only affect a single file.
    pub fn is_file_scoped(&self) -> bool {
        matches!(
            self,
            Self::InvalidEncoding { .. }
                | Self::Unreadable { .. }
                | Self::CreateFailed { .. }
                | Self::UpdateFailed { .. }
                | Self::WriteBack { .. }
                | Self::DuplicateTitle { .. }
        )
    }
}
