//! In-memory storage backend for testing.

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};
use std::io;

/// An in-memory storage backend.
///
/// This backend stores all data in memory and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Fault injection (short writes, failing seeks)
///
/// # Example
///
/// ```rust
/// use staffdb_storage::{StorageBackend, InMemoryBackend};
///
/// let mut backend = InMemoryBackend::new();
/// assert_eq!(backend.write(b"test data").unwrap(), 9);
/// assert_eq!(backend.size().unwrap(), 9);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    data: Vec<u8>,
    cursor: u64,
    write_limit: Option<u64>,
    fail_seeks: bool,
}

impl InMemoryBackend {
    /// Creates a new empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory backend with pre-existing data.
    ///
    /// Useful for testing validation of hand-crafted files.
    #[must_use]
    pub fn with_data(data: Vec<u8>) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    /// Creates a backend that never grows past `limit` bytes.
    ///
    /// Writes that would cross the limit are cut short, which lets tests
    /// observe partial writes.
    #[must_use]
    pub fn with_write_limit(limit: u64) -> Self {
        Self {
            write_limit: Some(limit),
            ..Self::default()
        }
    }

    /// Makes every subsequent `seek_to` fail.
    pub fn set_fail_seeks(&mut self, fail: bool) {
        self.fail_seeks = fail;
    }

    /// Returns a copy of all data in the backend.
    #[must_use]
    pub fn data(&self) -> Vec<u8> {
        self.data.clone()
    }

    fn cursor_index(&self) -> StorageResult<usize> {
        usize::try_from(self.cursor).map_err(|_| {
            StorageError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("cursor {} exceeds addressable memory", self.cursor),
            ))
        })
    }
}

impl StorageBackend for InMemoryBackend {
    fn seek_to(&mut self, offset: u64) -> StorageResult<u64> {
        if self.fail_seeks {
            return Err(StorageError::Seek {
                offset,
                source: io::Error::new(io::ErrorKind::Other, "seek disabled"),
            });
        }
        self.cursor = offset;
        Ok(offset)
    }

    fn read(&mut self, buf: &mut [u8]) -> StorageResult<usize> {
        let start = self.cursor_index()?;
        if start >= self.data.len() {
            return Ok(0);
        }

        let n = buf.len().min(self.data.len() - start);
        buf[..n].copy_from_slice(&self.data[start..start + n]);
        self.cursor += n as u64;
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> StorageResult<usize> {
        let start = self.cursor_index()?;
        let mut n = data.len();
        if let Some(limit) = self.write_limit {
            let room = limit.saturating_sub(self.cursor);
            n = n.min(usize::try_from(room).unwrap_or(usize::MAX));
        }
        if n == 0 {
            return Ok(0);
        }

        let end = start + n;
        if self.data.len() < end {
            self.data.resize(end, 0);
        }
        self.data[start..end].copy_from_slice(&data[..n]);
        self.cursor += n as u64;
        Ok(n)
    }

    fn size(&self) -> StorageResult<u64> {
        Ok(self.data.len() as u64)
    }

    fn set_len(&mut self, len: u64) -> StorageResult<()> {
        let len = usize::try_from(len).map_err(|_| {
            StorageError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("cannot resize to {len} bytes"),
            ))
        })?;
        self.data.resize(len, 0);
        Ok(())
    }

    fn flush(&mut self) -> StorageResult<()> {
        // In-memory backend has no pending writes
        Ok(())
    }

    fn sync(&mut self) -> StorageResult<()> {
        // In-memory backend has no metadata to sync
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_new_is_empty() {
        let backend = InMemoryBackend::new();
        assert_eq!(backend.size().unwrap(), 0);
        assert!(backend.data().is_empty());
    }

    #[test]
    fn memory_write_advances_cursor() {
        let mut backend = InMemoryBackend::new();

        assert_eq!(backend.write(b"hello").unwrap(), 5);
        assert_eq!(backend.write(b" world").unwrap(), 6);
        assert_eq!(backend.size().unwrap(), 11);
        assert_eq!(backend.data(), b"hello world");
    }

    #[test]
    fn memory_overwrite_from_start() {
        let mut backend = InMemoryBackend::with_data(b"hello world".to_vec());
        backend.seek_to(0).unwrap();
        backend.write(b"HELLO").unwrap();
        assert_eq!(backend.data(), b"HELLO world");
    }

    #[test]
    fn memory_read_returns_correct_data() {
        let mut backend = InMemoryBackend::with_data(b"hello world".to_vec());

        let mut buf = [0u8; 5];
        assert_eq!(backend.read(&mut buf).unwrap(), 5);
        assert_eq!(&buf, b"hello");

        backend.seek_to(6).unwrap();
        assert_eq!(backend.read(&mut buf).unwrap(), 5);
        assert_eq!(&buf, b"world");
    }

    #[test]
    fn memory_read_past_end_is_short() {
        let mut backend = InMemoryBackend::with_data(b"hello".to_vec());
        backend.seek_to(3).unwrap();

        let mut buf = [0u8; 8];
        assert_eq!(backend.read(&mut buf).unwrap(), 2);

        backend.seek_to(10).unwrap();
        assert_eq!(backend.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn memory_write_past_end_zero_fills() {
        let mut backend = InMemoryBackend::new();
        backend.seek_to(3).unwrap();
        backend.write(b"x").unwrap();
        assert_eq!(backend.data(), vec![0, 0, 0, b'x']);
    }

    #[test]
    fn memory_write_limit_cuts_writes_short() {
        let mut backend = InMemoryBackend::with_write_limit(6);
        assert_eq!(backend.write(b"hello").unwrap(), 5);
        assert_eq!(backend.write(b" world").unwrap(), 1);
        assert_eq!(backend.write(b"!").unwrap(), 0);
        assert_eq!(backend.data(), b"hello ");
    }

    #[test]
    fn memory_failing_seek() {
        let mut backend = InMemoryBackend::new();
        backend.set_fail_seeks(true);
        assert!(matches!(
            backend.seek_to(0),
            Err(StorageError::Seek { offset: 0, .. })
        ));
    }

    #[test]
    fn memory_set_len() {
        let mut backend = InMemoryBackend::with_data(b"hello world".to_vec());

        backend.set_len(5).unwrap();
        assert_eq!(backend.data(), b"hello");

        backend.set_len(7).unwrap();
        assert_eq!(backend.data(), b"hello\0\0");
    }

    #[test]
    fn memory_flush_and_sync_succeed() {
        let mut backend = InMemoryBackend::new();
        backend.write(b"data").unwrap();
        assert!(backend.flush().is_ok());
        assert!(backend.sync().is_ok());
    }
}
