//! Storage backend trait definition.

use crate::error::StorageResult;

/// A low-level storage backend for StaffDB.
///
/// A backend models one open file: a byte store with a cursor. StaffDB
/// core drives it with seek/read/write calls and interprets every byte
/// itself; backends know nothing about headers or records.
///
/// # Invariants
///
/// - `read` and `write` start at the cursor and advance it by the
///   number of bytes transferred
/// - `read` returns fewer bytes than requested only at end of storage
/// - `write` returns fewer bytes than requested only when the backend
///   cannot accept more data
/// - `size` reflects every completed write and `set_len`
///
/// # Exclusive access
///
/// Backends assume a single writer. Nothing stops another process from
/// changing a file between two calls; callers that need protection take
/// an advisory lock (see [`super::FileBackend::try_lock_exclusive`]).
///
/// # Implementors
///
/// - [`super::InMemoryBackend`] - For testing
/// - [`super::FileBackend`] - For persistent storage
pub trait StorageBackend: Send {
    /// Moves the cursor to the absolute `offset`.
    ///
    /// Returns the new cursor position.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StorageError::Seek`] if the cursor cannot be moved.
    fn seek_to(&mut self, offset: u64) -> StorageResult<u64>;

    /// Reads into `buf` from the cursor until `buf` is full or the end
    /// of storage is reached.
    ///
    /// Returns the number of bytes read.
    ///
    /// # Errors
    ///
    /// Returns an error if an I/O error occurs.
    fn read(&mut self, buf: &mut [u8]) -> StorageResult<usize>;

    /// Writes `data` at the cursor.
    ///
    /// Returns the number of bytes accepted, which may be less than
    /// `data.len()`.
    ///
    /// # Errors
    ///
    /// Returns an error if an I/O error occurs.
    fn write(&mut self, data: &[u8]) -> StorageResult<usize>;

    /// Returns the current size of the storage in bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be determined.
    fn size(&self) -> StorageResult<u64>;

    /// Truncates or zero-extends the storage to exactly `len` bytes.
    ///
    /// The cursor is left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the resize fails.
    fn set_len(&mut self, len: u64) -> StorageResult<()>;

    /// Flushes all pending writes to the OS.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush operation fails.
    fn flush(&mut self) -> StorageResult<()>;

    /// Syncs all data and metadata to durable storage.
    ///
    /// This is a stronger guarantee than `flush` - it ensures that
    /// file metadata (size, timestamps) is also durable.
    ///
    /// # Errors
    ///
    /// Returns an error if the sync operation fails.
    fn sync(&mut self) -> StorageResult<()>;
}
