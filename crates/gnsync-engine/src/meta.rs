//! Leading `Key: value` header embedded in each synced file.
//!
//! ```text
//! Date: 2023-05-01
//! Tags: work
//!     travel
//! EvernoteGUID: 6c0e...
//! EvernoteUpdate: 2023-05-02 10:31
//!
//! body text...
//! ```
//!
//! The header is kept as the ordered list of raw lines it was read from, so
//! write-back reproduces every untouched line byte-for-byte and only the two
//! sync keys are refreshed.

use std::sync::LazyLock;

use chrono::{DateTime, Local};
use regex::Regex;

use crate::timestamp::format_push_time;

pub const DATE_KEY: &str = "date";
pub const GUID_KEY: &str = "evernoteguid";
pub const UPDATE_KEY: &str = "evernoteupdate";

static META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ ]{0,3}(?P<key>[A-Za-z0-9_-]+):\s*(?P<value>.*)$").expect("valid regex")
});
static META_MORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ ]{4,}(?P<value>.*)$").expect("valid regex"));

/// One raw header line and the (lowercased) key it belongs to.
///
/// Continuation lines carry the key of the line they continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLine {
    pub key: String,
    pub raw: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    lines: Vec<HeaderLine>,
    values: Vec<(String, Vec<String>)>,
}

impl Header {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[HeaderLine] {
        &self.lines
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(key, _)| key.as_str())
    }

    /// All values of `key`, in file order.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        let key = key.to_ascii_lowercase();
        self.values
            .iter()
            .find(|(existing, _)| *existing == key)
            .map(|(_, values)| values.as_slice())
    }

    /// First value of `key`; empty values count as absent.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn push(&mut self, key: &str, value: String, raw: &str) {
        self.lines.push(HeaderLine {
            key: key.to_string(),
            raw: raw.to_string(),
        });
        match self.values.iter_mut().find(|(existing, _)| existing == key) {
            Some((_, values)) => values.push(value),
            None => self.values.push((key.to_string(), vec![value])),
        }
    }
}

/// A file split into its header and the untouched remainder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    pub header: Header,
    /// Everything after the header, starting with the blank separator line
    /// when there is one.
    pub body: String,
}

/// Split `raw` into header and body.
///
/// The header ends at the first blank line or the first line that is
/// neither `key: value` nor an indented continuation.
pub fn extract(raw: &str) -> Extracted {
    let mut header = Header::default();
    let mut open_key: Option<String> = None;
    let mut offset = 0;

    for segment in raw.split_inclusive('\n') {
        let raw_line = segment.strip_suffix('\n').unwrap_or(segment);
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);

        if line.trim().is_empty() {
            break;
        }

        if let Some(caps) = META_RE.captures(line) {
            let key = caps["key"].trim().to_ascii_lowercase();
            let value = caps["value"].trim().to_string();
            header.push(&key, value, raw_line);
            open_key = Some(key);
        } else if let (Some(key), Some(caps)) = (open_key.as_deref(), META_MORE_RE.captures(line)) {
            let value = caps["value"].trim().to_string();
            header.push(key, value, raw_line);
        } else {
            break;
        }

        offset += segment.len();
    }

    Extracted {
        header,
        body: raw[offset..].to_string(),
    }
}

/// Rebuild file text with a fresh `EvernoteGUID` / `EvernoteUpdate` pair.
///
/// Existing sync lines (and their continuations) are dropped, every other
/// header line is kept verbatim and in order, the new pair is appended and
/// `body` is reattached unchanged. `EvernoteUpdate` comes from
/// [`format_push_time`].
///
/// Returns `None` when there is no identifier to record.
pub fn inject(
    header: &Header,
    body: &str,
    remote_id: &str,
    now: DateTime<Local>,
) -> Option<String> {
    let remote_id = remote_id.trim();
    if remote_id.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(body.len() + 128);
    for line in header
        .lines()
        .iter()
        .filter(|line| line.key != GUID_KEY && line.key != UPDATE_KEY)
    {
        out.push_str(&line.raw);
        out.push('\n');
    }
    out.push_str(&format!("{GUID_KEY}: {remote_id}\n"));
    out.push_str(&format!("{UPDATE_KEY}: {}\n", format_push_time(now)));

    // Without a header of its own the body's first line could be indented
    // text, which would read back as a continuation of `evernoteupdate`.
    if header.is_empty() && !body.is_empty() && !starts_with_blank_line(body) {
        out.push('\n');
    }
    out.push_str(body);
    Some(out)
}

fn starts_with_blank_line(text: &str) -> bool {
    text.split('\n')
        .next()
        .is_some_and(|first| first.trim().is_empty())
}

#[cfg(test)]
#[path = "meta_tests.rs"]
mod tests;
