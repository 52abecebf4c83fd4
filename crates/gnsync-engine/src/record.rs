use std::path::PathBuf;

use chrono::Utc;
use gnsync_core::SyncError;
use tracing::warn;

use crate::content::ContentConverter;
use crate::meta::{DATE_KEY, GUID_KEY, Header, UPDATE_KEY};
use crate::scanner::ScannedFile;
use crate::timestamp::parse_timestamp;

/// One local file, read and normalized for a single run.
#[derive(Debug, Clone)]
pub struct SourceRecord {
    pub path: PathBuf,
    /// File name without extension; used as the note title.
    pub title: String,
    pub raw_content: String,
    /// Converted note content.
    pub content: String,
    pub header: Header,
    /// Raw text after the header.
    pub body: String,
    pub mtime_ms: Option<i64>,
    /// `Date` header in epoch ms.
    pub date_ms: Option<i64>,
    /// `EvernoteUpdate` header in epoch ms: the last successful push.
    pub pushed_at_ms: Option<i64>,
    /// `EvernoteGUID` header.
    pub remote_id: Option<String>,
}

impl SourceRecord {
    /// Read `file` from disk and build its record.
    pub fn load(file: &ScannedFile, converter: &dyn ContentConverter) -> Result<Self, SyncError> {
        let bytes = std::fs::read(&file.path).map_err(|err| SyncError::Unreadable {
            file: file.name.clone(),
            reason: err.to_string(),
        })?;
        let raw = String::from_utf8(bytes).map_err(|_| SyncError::InvalidEncoding {
            file: file.name.clone(),
        })?;
        Ok(Self::from_text(file, raw, converter))
    }

    pub fn from_text(file: &ScannedFile, raw: String, converter: &dyn ContentConverter) -> Self {
        let converted = converter.convert(&raw);
        let header = converted.header;

        let date_ms = header_timestamp(&header, DATE_KEY, &file.name);
        let pushed_at_ms = header_timestamp(&header, UPDATE_KEY, &file.name);
        let remote_id = header.first(GUID_KEY).map(str::to_string);

        Self {
            path: file.path.clone(),
            title: file.name.clone(),
            raw_content: raw,
            content: converted.content,
            header,
            body: converted.body,
            mtime_ms: file.mtime_ms,
            date_ms,
            pushed_at_ms,
            remote_id,
        }
    }

    /// Creation time pushed to the store: `Date` header, else mtime.
    pub fn created_ms(&self) -> i64 {
        self.date_ms
            .or(self.mtime_ms)
            .unwrap_or_else(|| Utc::now().timestamp_millis())
    }
}

fn header_timestamp(header: &Header, key: &str, file: &str) -> Option<i64> {
    let value = header.first(key)?;
    let parsed = parse_timestamp(value);
    if parsed.is_none() {
        warn!(file, key, value, "ignoring unparseable date in header");
    }
    parsed
}
