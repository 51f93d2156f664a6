//! Append-only JSON-array log store.
//!
//! A log file is a single JSON array of event objects, pretty-printed with
//! two-space indentation. `append` is a read-modify-write of the whole
//! array: read, push, then write a temp file in the same directory and
//! rename it over the log. The rename means a crash never leaves a torn
//! file, but it does not serialize writers.
//!
//! # Single-writer contract
//!
//! Two processes appending to the same file without coordination can both
//! read the same prior array, and the later rename silently drops the other
//! entry. Callers must either serialize appends themselves or enable the
//! advisory lock with `with_lock(true)`, which takes an exclusive `fs2` lock
//! on a `<log>.lock` sidecar for the duration of each append.

use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use fs2::FileExt;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use codex_contracts::{
    error::{CodexError, CodexResult},
    event::AuditEvent,
};
use codex_core::json::read_json_array;

/// A JSON-array log file on disk.
#[derive(Debug, Clone)]
pub struct JsonArrayStore {
    path: PathBuf,
    lock: bool,
}

impl JsonArrayStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: false,
        }
    }

    /// Enable or disable the advisory lock around `append`.
    pub fn with_lock(mut self, lock: bool) -> Self {
        self.lock = lock;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create missing parent directories and initialize the file with an
    /// empty array if it does not exist.
    ///
    /// Idempotent: an existing file is never touched, whatever it contains.
    pub fn ensure(&self) -> CodexResult<()> {
        self.ensure_dir()?;
        if !self.path.exists() {
            self.write_array(&[])?;
            info!(path = %self.path.display(), "initialized log file");
        }

        Ok(())
    }

    /// Read the whole array.
    ///
    /// Returns `NotFound` if the file is absent and `Parse` if it is not a
    /// JSON array.
    pub fn read_all(&self) -> CodexResult<Vec<Value>> {
        read_json_array(&self.path)
    }

    /// Read the whole array as typed events.
    pub fn read_events(&self) -> CodexResult<Vec<AuditEvent>> {
        self.read_all()?
            .into_iter()
            .enumerate()
            .map(|(idx, value)| {
                serde_json::from_value(value).map_err(|e| CodexError::Parse {
                    path: self.path.display().to_string(),
                    reason: format!("element {idx} is not an audit event: {e}"),
                })
            })
            .collect()
    }

    /// Append `entry` to the end of the array, preserving every prior
    /// element and its order. Returns the new length.
    ///
    /// A file holding invalid JSON is a `Parse` error and is left untouched.
    pub fn append<T: Serialize>(&self, entry: &T) -> CodexResult<usize> {
        let entry = serde_json::to_value(entry).map_err(|e| CodexError::Parse {
            path: self.path.display().to_string(),
            reason: format!("entry is not serializable: {e}"),
        })?;

        // The lock sidecar needs the directory; the file itself is created
        // under the lock so a concurrent first append cannot reset it.
        self.ensure_dir()?;
        let _guard = if self.lock {
            Some(LockGuard::acquire(&self.lock_path())?)
        } else {
            None
        };
        self.ensure()?;

        let mut entries = self.read_all()?;
        entries.push(entry);
        self.write_array(&entries)?;

        debug!(path = %self.path.display(), count = entries.len(), "appended log entry");
        Ok(entries.len())
    }

    fn ensure_dir(&self) -> CodexResult<()> {
        let dir = self.dir();
        if !dir.exists() {
            std::fs::create_dir_all(&dir).map_err(|e| io_error(&dir, e))?;
            info!(dir = %dir.display(), "created log directory");
        }
        Ok(())
    }

    fn dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Write via temp file and rename so readers never see a partial array.
    fn write_array(&self, entries: &[Value]) -> CodexResult<()> {
        let body = serde_json::to_string_pretty(entries).map_err(|e| CodexError::Parse {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;

        let dir = self.dir();
        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| io_error(&dir, e))?;
        tmp.write_all(body.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| io_error(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| io_error(&self.path, e.error))?;
        Ok(())
    }
}

fn io_error(path: &Path, e: std::io::Error) -> CodexError {
    CodexError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

/// Exclusive advisory lock held until drop.
struct LockGuard {
    file: File,
    path: PathBuf,
}

impl LockGuard {
    fn acquire(path: &Path) -> CodexResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)
            .map_err(|e| CodexError::LockFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        file.lock_exclusive().map_err(|e| CodexError::LockFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        debug!(lock = %path.display(), "acquired log lock");
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(lock = %self.path.display(), error = %e, "failed to release log lock");
        }
    }
}
