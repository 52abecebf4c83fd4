/// Errors returned by a [`crate::NoteStore`].
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Note '{0}' not found")]
    NotFound(String),

    #[error("Note store returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Note store request failed: {0}")]
    Transport(String),

    #[error("Invalid note store response: {0}")]
    InvalidResponse(String),

    #[error("Note store rejected the request: {0}")]
    Rejected(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
