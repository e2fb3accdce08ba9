//! File-based storage backend for persistent storage.

use crate::backend::StorageBackend;
use crate::error::{StorageError, StorageResult};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// A file-based storage backend.
///
/// This backend wraps an open OS file handle. Data survives process
/// restarts. The handle is closed when the backend is dropped, on every
/// exit path.
///
/// # Durability
///
/// - `flush()` calls `File::flush()` to push data to the OS
/// - `sync()` calls `File::sync_all()` to ensure data is on disk
///
/// # Example
///
/// ```no_run
/// use staffdb_storage::{StorageBackend, FileBackend};
/// use std::path::Path;
///
/// let mut backend = FileBackend::create_new(Path::new("employees.db")).unwrap();
/// backend.write(b"persistent data").unwrap();
/// backend.sync().unwrap();  // Ensure data is durable
/// ```
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    file: File,
}

impl FileBackend {
    /// Creates a new file at `path`, failing if anything already exists there.
    ///
    /// An existing file is never truncated.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::AlreadyExists`] if the path is taken, or
    /// [`StorageError::Open`] for any other OS failure.
    pub fn create_new(path: &Path) -> StorageResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|source| {
                if source.kind() == io::ErrorKind::AlreadyExists {
                    StorageError::AlreadyExists {
                        path: path.to_path_buf(),
                    }
                } else {
                    StorageError::Open {
                        path: path.to_path_buf(),
                        source,
                    }
                }
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Opens an existing file for reading and writing.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the file is missing or cannot be opened.
    pub fn open(path: &Path) -> StorageResult<Self> {
        Self::open_with(path, OpenOptions::new().read(true).write(true))
    }

    /// Opens an existing file for reading only.
    ///
    /// Writes through a read-only backend fail with an I/O error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the file is missing or cannot be opened.
    pub fn open_read_only(path: &Path) -> StorageResult<Self> {
        Self::open_with(path, OpenOptions::new().read(true))
    }

    fn open_with(path: &Path, options: &OpenOptions) -> StorageResult<Self> {
        let file = options.open(path).map_err(|source| StorageError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// Takes a non-blocking exclusive advisory lock on the file.
    ///
    /// The lock is released when the backend is dropped. It only guards
    /// against other processes that also take the lock.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Locked`] if another handle holds the lock.
    pub fn try_lock_exclusive(&self) -> StorageResult<()> {
        self.file
            .try_lock_exclusive()
            .map_err(|_| StorageError::Locked)
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageBackend for FileBackend {
    fn seek_to(&mut self, offset: u64) -> StorageResult<u64> {
        self.file
            .seek(SeekFrom::Start(offset))
            .map_err(|source| StorageError::Seek { offset, source })
    }

    fn read(&mut self, buf: &mut [u8]) -> StorageResult<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.file.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }

    fn write(&mut self, data: &[u8]) -> StorageResult<usize> {
        let mut written = 0;
        while written < data.len() {
            match self.file.write(&data[written..]) {
                Ok(0) => break,
                Ok(n) => written += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(written)
    }

    fn size(&self) -> StorageResult<u64> {
        Ok(self.file.metadata()?.len())
    }

    fn set_len(&mut self, len: u64) -> StorageResult<()> {
        self.file.set_len(len)?;
        Ok(())
    }

    fn flush(&mut self) -> StorageResult<()> {
        self.file.flush()?;
        Ok(())
    }

    fn sync(&mut self) -> StorageResult<()> {
        self.file.sync_all()?;
        Ok(())
    }
}
