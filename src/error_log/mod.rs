//! Capped log of tracked errors.
//!
//! Errors that escape the retry loop are mirrored here for later inspection,
//! whether or not the caller handles them. The log keeps at most
//! `ERROR_LOG_CAPACITY` entries, most-recent-last, evicting the oldest.
//!
//! The log is an injected collaborator ([`ErrorLog`]) so callers can choose
//! persistence: [`FileErrorLog`] for the CLI, [`MemoryErrorLog`] for tests and
//! embedding.

mod entry;
mod file;
mod memory;

pub use entry::ErrorEntry;
pub use file::FileErrorLog;
pub use memory::MemoryErrorLog;

/// Sink for tracked errors.
///
/// Implementations enforce the capacity cap on every `track` and never fail:
/// storage problems are logged and the entry is dropped.
pub trait ErrorLog: Send + Sync {
    /// Appends an entry, evicting the oldest past capacity.
    fn track(&self, entry: ErrorEntry);

    /// All entries, oldest first.
    fn get_all(&self) -> Vec<ErrorEntry>;

    /// Removes every entry.
    fn clear(&self);
}
