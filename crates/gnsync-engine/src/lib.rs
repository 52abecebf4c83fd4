//! Reconciliation engine: pushes a directory of text files into a note store.
//!
//! Each file carries its own sync state in a leading `Key: value` header
//! (`EvernoteGUID`, `EvernoteUpdate`), so the files themselves are the ledger.

pub mod content;
pub mod meta;
pub mod notebook;
pub mod reconcile;
pub mod record;
pub mod report;
pub mod scanner;
pub mod session;
pub mod timestamp;

pub use content::{ContentConverter, Converted, MarkdownConverter, PlainConverter, converter_for};
pub use meta::{Extracted, Header, HeaderLine, extract, inject};
pub use notebook::{default_notebook_name, resolve_notebook};
pub use reconcile::{ReconcileOptions, Reconciler, SyncDecision, decide, is_dirty};
pub use record::SourceRecord;
pub use report::{FileReport, SyncReport};
pub use scanner::{ScannedFile, list_files, resolve_sync_dir};
pub use session::{SyncRequest, sync_directory};
pub use timestamp::{format_push_time, parse_timestamp};
