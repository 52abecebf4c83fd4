use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{NewNote, Note, NoteStore, Notebook, StoreError};

/// JSON-over-HTTP note-store client authenticated with a bearer token.
#[derive(Debug)]
pub struct HttpNoteStore {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct CreateNotebookRequest<'a> {
    name: &'a str,
}

impl HttpNoteStore {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(StoreError::Rejected("access token is empty".into()));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| StoreError::Transport(err.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `notes/{guid}` with the guid as one percent-encoded segment.
    ///
    /// Dot-only guids would be collapsed by URL normalization, so no note
    /// can live there.
    fn note_path(guid: &str) -> Result<String, StoreError> {
        if guid.is_empty() || guid.chars().all(|ch| ch == '.') {
            return Err(StoreError::NotFound(guid.to_string()));
        }
        Ok(format!("notes/{}", urlencoding::encode(guid)))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        subject: &str,
    ) -> Result<T, StoreError> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|err| StoreError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| StoreError::Transport(err.to_string()))?;
        debug!(%status, subject, "note store response");

        if !status.is_success() {
            return Err(map_status(status, subject, body));
        }

        serde_json::from_str(&body).map_err(|err| StoreError::InvalidResponse(err.to_string()))
    }
}

fn map_status(status: StatusCode, subject: &str, body: String) -> StoreError {
    if status == StatusCode::NOT_FOUND {
        return StoreError::NotFound(subject.to_string());
    }
    StoreError::Status {
        status: status.as_u16(),
        body,
    }
}

#[async_trait]
impl NoteStore for HttpNoteStore {
    async fn get_note(&self, guid: &str) -> Result<Note, StoreError> {
        let request = self.client.get(self.url(&Self::note_path(guid)?));
        self.send(request, guid).await
    }

    async fn create_note(&self, note: NewNote) -> Result<Note, StoreError> {
        let request = self.client.post(self.url("notes")).json(&note);
        self.send(request, &note.title).await
    }

    async fn update_note(&self, note: &Note) -> Result<Note, StoreError> {
        let request = self
            .client
            .put(self.url(&Self::note_path(&note.guid)?))
            .json(note);
        self.send(request, &note.guid).await
    }

    async fn list_notebooks(&self) -> Result<Vec<Notebook>, StoreError> {
        let request = self.client.get(self.url("notebooks"));
        self.send(request, "notebooks").await
    }

    async fn create_notebook(&self, name: &str) -> Result<Notebook, StoreError> {
        let request = self
            .client
            .post(self.url("notebooks"))
            .json(&CreateNotebookRequest { name });
        self.send(request, name).await
    }
}
