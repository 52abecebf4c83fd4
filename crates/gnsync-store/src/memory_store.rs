use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use ulid::Ulid;

use crate::{NewNote, Note, NoteStore, Notebook, StoreError};

/// In-process note store.
///
/// Backs the engine's tests and offline runs; individual operations can be
/// made to fail to exercise the error paths of a sync run.
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    notes: BTreeMap<String, Note>,
    notebooks: Vec<Notebook>,
    created: usize,
    updated: usize,
    fail_create_titles: HashSet<String>,
    fail_updates: bool,
    fail_gets: bool,
    fail_notebook_listing: bool,
    fail_notebook_creation: bool,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Seed a note as if it had been pushed earlier.
    pub fn insert_note(&self, note: Note) {
        self.state().notes.insert(note.guid.clone(), note);
    }

    pub fn insert_notebook(&self, guid: &str, name: &str) {
        self.state().notebooks.push(Notebook {
            guid: guid.to_string(),
            name: name.to_string(),
        });
    }

    pub fn note(&self, guid: &str) -> Option<Note> {
        self.state().notes.get(guid).cloned()
    }

    pub fn notes(&self) -> Vec<Note> {
        self.state().notes.values().cloned().collect()
    }

    pub fn notebooks(&self) -> Vec<Notebook> {
        self.state().notebooks.clone()
    }

    /// Number of successful `create_note` calls.
    pub fn created_count(&self) -> usize {
        self.state().created
    }

    /// Number of successful `update_note` calls.
    pub fn updated_count(&self) -> usize {
        self.state().updated
    }

    pub fn fail_create_for(&self, title: &str) {
        self.state().fail_create_titles.insert(title.to_string());
    }

    pub fn fail_updates(&self) {
        self.state().fail_updates = true;
    }

    pub fn fail_gets(&self) {
        self.state().fail_gets = true;
    }

    pub fn fail_notebook_listing(&self) {
        self.state().fail_notebook_listing = true;
    }

    pub fn fail_notebook_creation(&self) {
        self.state().fail_notebook_creation = true;
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn get_note(&self, guid: &str) -> Result<Note, StoreError> {
        let state = self.state();
        if state.fail_gets {
            return Err(StoreError::Transport("connection reset".into()));
        }
        state
            .notes
            .get(guid)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(guid.to_string()))
    }

    async fn create_note(&self, note: NewNote) -> Result<Note, StoreError> {
        let mut state = self.state();
        if state.fail_create_titles.contains(&note.title) {
            return Err(StoreError::Rejected(format!(
                "create refused for '{}'",
                note.title
            )));
        }
        let created = Note {
            guid: Ulid::new().to_string(),
            title: note.title,
            content: note.content,
            notebook_guid: note.notebook_guid,
            created: note.created,
            updated: Utc::now().timestamp_millis(),
            attributes: note.attributes,
        };
        state.notes.insert(created.guid.clone(), created.clone());
        state.created += 1;
        Ok(created)
    }

    async fn update_note(&self, note: &Note) -> Result<Note, StoreError> {
        let mut state = self.state();
        if state.fail_updates {
            return Err(StoreError::Status {
                status: 500,
                body: "update failed".into(),
            });
        }
        if !state.notes.contains_key(&note.guid) {
            return Err(StoreError::NotFound(note.guid.clone()));
        }
        state.notes.insert(note.guid.clone(), note.clone());
        state.updated += 1;
        Ok(note.clone())
    }

    async fn list_notebooks(&self) -> Result<Vec<Notebook>, StoreError> {
        let state = self.state();
        if state.fail_notebook_listing {
            return Err(StoreError::Transport("connection refused".into()));
        }
        Ok(state.notebooks.clone())
    }

    async fn create_notebook(&self, name: &str) -> Result<Notebook, StoreError> {
        let mut state = self.state();
        if state.fail_notebook_creation {
            return Err(StoreError::Rejected(format!(
                "notebook '{name}' refused"
            )));
        }
        let notebook = Notebook {
            guid: Ulid::new().to_string(),
            name: name.to_string(),
        };
        state.notebooks.push(notebook.clone());
        Ok(notebook)
    }
}
