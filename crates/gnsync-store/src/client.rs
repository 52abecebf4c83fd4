use async_trait::async_trait;

use crate::{NewNote, Note, Notebook, StoreError};

/// Remote note-store operations needed by the sync engine
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Fetch a note by guid; `StoreError::NotFound` when it does not exist
    async fn get_note(&self, guid: &str) -> Result<Note, StoreError>;
    /// Create a note; the store assigns the guid
    async fn create_note(&self, note: NewNote) -> Result<Note, StoreError>;
    /// Overwrite an existing note's fields
    async fn update_note(&self, note: &Note) -> Result<Note, StoreError>;
    async fn list_notebooks(&self) -> Result<Vec<Notebook>, StoreError>;
    async fn create_notebook(&self, name: &str) -> Result<Notebook, StoreError>;
}
