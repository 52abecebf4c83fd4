use serde::{Deserialize, Serialize};

/// Provenance attributes attached to notes created from local files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteAttributes {
    #[serde(default)]
    pub source_application: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// A note as the remote store represents it. Timestamps are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub guid: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub notebook_guid: Option<String>,
    pub created: i64,
    pub updated: i64,
    #[serde(default)]
    pub attributes: NoteAttributes,
}

/// Payload for creating a note; the store assigns the guid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub notebook_guid: Option<String>,
    pub created: i64,
    pub attributes: NoteAttributes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notebook {
    pub guid: String,
    pub name: String,
}
