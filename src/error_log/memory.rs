//! In-process error log.

use std::collections::VecDeque;
use std::sync::Mutex;

use super::{ErrorEntry, ErrorLog};
use crate::config::ERROR_LOG_CAPACITY;

/// Error log held in memory. Used by tests and by callers that do not persist errors.
#[derive(Debug)]
pub struct MemoryErrorLog {
    entries: Mutex<VecDeque<ErrorEntry>>,
    capacity: usize,
}

impl Default for MemoryErrorLog {
    fn default() -> Self {
        Self::with_capacity(ERROR_LOG_CAPACITY)
    }
}

impl MemoryErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<ErrorEntry>> {
        // A poisoned log is still a usable log
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ErrorLog for MemoryErrorLog {
    fn track(&self, entry: ErrorEntry) {
        let mut entries = self.lock();
        entries.push_back(entry);
        while entries.len() > self.capacity {
            entries.pop_front();
        }
    }

    fn get_all(&self) -> Vec<ErrorEntry> {
        self.lock().iter().cloned().collect()
    }

    fn clear(&self) {
        self.lock().clear();
    }
}
