mod client;
mod error;
mod http_client;
mod memory_store;
mod note;

pub use client::NoteStore;
pub use error::StoreError;
pub use http_client::HttpNoteStore;
pub use memory_store::MemoryNoteStore;
pub use note::{NewNote, Note, NoteAttributes, Notebook};
