//! Error log persisted as a JSON array in a single file.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use log::warn;
use tempfile::NamedTempFile;

use super::{ErrorEntry, ErrorLog};
use crate::config::ERROR_LOG_CAPACITY;

/// Error log stored at a fixed path, most-recent-last.
///
/// Every `track` is a read-modify-write of the whole file under a process-wide
/// lock. A missing or unreadable file reads as an empty log. IO failures are
/// logged and swallowed: the log is a debugging aid and must never turn a
/// tracked error into a second failure.
#[derive(Debug)]
pub struct FileErrorLog {
    path: PathBuf,
    capacity: usize,
    lock: Mutex<()>,
}

impl FileErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_capacity(path, ERROR_LOG_CAPACITY)
    }

    pub fn with_capacity(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Vec<ErrorEntry> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("Failed to read error log {}: {e}", self.path.display());
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Ignoring corrupt error log {}: {e}", self.path.display());
                Vec::new()
            }
        }
    }

    /// Replaces the file atomically: entries go to a temporary sibling that is
    /// then renamed over the log, so a crash never leaves a half-written array.
    fn write_entries(&self, entries: &[ErrorEntry]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create error log directory {}", parent.display())
                })?;
                parent
            }
            _ => Path::new("."),
        };
        let json = serde_json::to_vec_pretty(entries).context("Failed to encode error log")?;

        let mut tmp = NamedTempFile::new_in(dir).with_context(|| {
            format!("Failed to create temporary error log in {}", dir.display())
        })?;
        tmp.write_all(&json)
            .and_then(|()| tmp.as_file().sync_all())
            .context("Failed to write temporary error log")?;
        tmp.persist(&self.path)
            .with_context(|| format!("Failed to replace error log {}", self.path.display()))?;
        Ok(())
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ErrorLog for FileErrorLog {
    fn track(&self, entry: ErrorEntry) {
        let _guard = self.guard();
        let mut entries = self.read_entries();
        entries.push(entry);
        if entries.len() > self.capacity {
            let excess = entries.len() - self.capacity;
            entries.drain(..excess);
        }
        if let Err(e) = self.write_entries(&entries) {
            warn!("Error log entry dropped: {e:#}");
        }
    }

    fn get_all(&self) -> Vec<ErrorEntry> {
        let _guard = self.guard();
        self.read_entries()
    }

    fn clear(&self) {
        let _guard = self.guard();
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to clear error log {}: {e}", self.path.display()),
        }
    }
}
