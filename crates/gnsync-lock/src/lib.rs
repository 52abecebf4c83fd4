//! Per-directory run lock using `flock(2)` directly.
//! Independent crate with no internal gnsync dependencies.
//!
//! A sync run owns its directory for the whole run: the lock file lives in
//! `{lock_root}/locks/{sha256(sync_dir)}.lock`, outside the synced directory,
//! so it can never be picked up by the file mask.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};

/// Diagnostic information written to lock files
#[derive(Debug, Serialize, Deserialize)]
struct LockDiagnostic {
    pid: u32,
    sync_dir: String,
    acquired_at: DateTime<Utc>,
}

/// Run lock guard backed by `flock(2)`.
///
/// Holds the open `File` whose fd carries the advisory lock.
/// On `Drop`, the lock is explicitly released via `flock(fd, LOCK_UN)`.
pub struct DirLock {
    file: File,
    lock_path: PathBuf,
}

impl std::fmt::Debug for DirLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirLock")
            .field("lock_path", &self.lock_path)
            .finish()
    }
}

impl Drop for DirLock {
    fn drop(&mut self) {
        let fd = self.file.as_raw_fd();
        // SAFETY: `fd` is a valid file descriptor owned by `self.file`.
        // If the call fails the lock is still released when the fd closes.
        unsafe {
            libc::flock(fd, libc::LOCK_UN);
        }
    }
}

impl DirLock {
    /// Get the path to the lock file
    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }
}

/// Lock file name for a sync directory: hex SHA-256 of its path.
pub fn lock_file_name(sync_dir: &Path) -> String {
    let digest = Sha256::digest(sync_dir.to_string_lossy().as_bytes());
    let hex: String = digest.iter().map(|byte| format!("{byte:02x}")).collect();
    format!("{hex}.lock")
}

/// Acquire a non-blocking exclusive lock for a sync directory.
///
/// On success the lock file holds a JSON diagnostic (pid, sync_dir,
/// acquired_at). On failure the error names the PID that holds the lock.
pub fn acquire_dir_lock(lock_root: &Path, sync_dir: &Path) -> Result<DirLock> {
    let locks_dir = lock_root.join("locks");
    fs::create_dir_all(&locks_dir)
        .with_context(|| format!("Failed to create locks directory: {}", locks_dir.display()))?;

    let lock_path = locks_dir.join(lock_file_name(sync_dir));

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .with_context(|| format!("Failed to open lock file: {}", lock_path.display()))?;

    let fd = file.as_raw_fd();

    // SAFETY: `fd` is a valid file descriptor from the `File` we just opened.
    // `LOCK_EX | LOCK_NB` requests an exclusive non-blocking lock.
    let ret = unsafe { libc::flock(fd, libc::LOCK_EX | libc::LOCK_NB) };

    if ret != 0 {
        let mut contents = String::new();
        File::open(&lock_path)
            .and_then(|mut diag_file| diag_file.read_to_string(&mut contents))
            .context("Failed to read lock file")?;

        let error_msg = match serde_json::from_str::<LockDiagnostic>(&contents) {
            Ok(diagnostic) => format!(
                "Directory {} is being synced by PID {} (since {})",
                diagnostic.sync_dir, diagnostic.pid, diagnostic.acquired_at
            ),
            Err(_) => format!(
                "Directory {} is locked (unable to read diagnostic info)",
                sync_dir.display()
            ),
        };
        return Err(anyhow::anyhow!(error_msg));
    }

    let mut lock = DirLock { file, lock_path };
    let diagnostic = LockDiagnostic {
        pid: std::process::id(),
        sync_dir: sync_dir.display().to_string(),
        acquired_at: Utc::now(),
    };
    let json = serde_json::to_string(&diagnostic).context("Failed to serialize lock diagnostic")?;

    lock.file
        .set_len(0)
        .context("Failed to truncate lock file")?;
    lock.file
        .write_all(json.as_bytes())
        .context("Failed to write lock diagnostic")?;
    lock.file.flush().context("Failed to flush lock file")?;

    Ok(lock)
}
