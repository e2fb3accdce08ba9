//! Error types for StaffDB core.

use staffdb_storage::StorageError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for core operations.
pub type DbResult<T> = Result<T, DbError>;

/// Errors that can occur in StaffDB core operations.
///
/// Every failure kind is its own variant so callers can report a specific
/// diagnostic for each. None of them is retried internally.
#[derive(Debug, Error)]
pub enum DbError {
    /// A new database was requested at a path that already exists.
    #[error("file already exists: {}", path.display())]
    FileExists {
        /// The existing path.
        path: PathBuf,
    },

    /// An existing database file could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    OpenFailed {
        /// The path that failed to open.
        path: PathBuf,
        /// The underlying OS error.
        source: io::Error,
    },

    /// Fewer bytes than a full header were available.
    #[error("failed to read header: expected {expected} bytes, got {actual}")]
    ReadError {
        /// Bytes required.
        expected: usize,
        /// Bytes actually read.
        actual: usize,
    },

    /// Fewer record bytes than the header declares were available.
    #[error("incomplete read: expected {expected} bytes, got {actual}")]
    IncompleteRead {
        /// Bytes required.
        expected: usize,
        /// Bytes actually read.
        actual: usize,
    },

    /// The backend accepted fewer bytes than were handed to it.
    #[error("short write: wrote {written} of {expected} bytes")]
    ShortWrite {
        /// Bytes that should have been written.
        expected: usize,
        /// Bytes the backend accepted.
        written: usize,
    },

    /// Repositioning the file cursor failed.
    #[error("seek to offset {offset} failed: {source}")]
    SeekError {
        /// The requested offset.
        offset: u64,
        /// The underlying OS error.
        source: io::Error,
    },

    /// The file does not start with the StaffDB magic number.
    #[error("bad magic: expected {expected:#010x}, got {actual:#010x}")]
    BadMagic {
        /// The format's magic number.
        expected: u32,
        /// The value found in the file.
        actual: u32,
    },

    /// The header carries a version other than the supported one.
    #[error("unsupported format version {version} (expected {expected})")]
    UnsupportedVersion {
        /// The supported version.
        expected: u16,
        /// The version found in the file.
        version: u16,
    },

    /// The file length, the header's declared size and its record count
    /// do not all agree.
    #[error("corrupt file: header declares {declared} bytes, file has {actual}")]
    CorruptFile {
        /// Size the header declares, or implies through its record count.
        declared: u64,
        /// Actual file size.
        actual: u64,
    },

    /// A record count does not fit the format or the address space.
    #[error("record count {count} overflows")]
    CountOverflow {
        /// The offending count.
        count: usize,
    },

    /// The header count and the record sequence length disagree.
    #[error("header count {header_count} does not match {records} records in memory")]
    CountMismatch {
        /// Count stored in the header.
        header_count: u16,
        /// Length of the record sequence.
        records: usize,
    },

    /// Input did not split into name, address and hours.
    #[error(
        "malformed input: expected 3 non-empty comma-separated fields, got {fields} ({empty} empty)"
    )]
    MalformedInput {
        /// Number of comma-separated fields found.
        fields: usize,
        /// How many of those fields were empty.
        empty: usize,
    },

    /// The hours field is not a non-negative integer that fits in 32 bits.
    #[error("invalid hours value: {value:?}")]
    InvalidHoursValue {
        /// The rejected text.
        value: String,
    },

    /// A record index past the end of the sequence.
    #[error("record index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The sequence length.
        len: usize,
    },

    /// A buffer for the record set could not be allocated.
    #[error("failed to allocate {bytes} bytes")]
    AllocationFailed {
        /// Requested allocation size.
        bytes: usize,
    },

    /// Another process holds the advisory lock on the database file.
    #[error("database locked: another process has exclusive access")]
    DatabaseLocked,

    /// Any other storage backend failure.
    #[error("storage error: {0}")]
    Storage(#[source] StorageError),
}

impl From<StorageError> for DbError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::AlreadyExists { path } => Self::FileExists { path },
            StorageError::Open { path, source } => Self::OpenFailed { path, source },
            StorageError::Seek { offset, source } => Self::SeekError { offset, source },
            StorageError::Locked => Self::DatabaseLocked,
            other => Self::Storage(other),
        }
    }
}

impl DbError {
    /// Creates an invalid hours error.
    pub fn invalid_hours(value: impl Into<String>) -> Self {
        Self::InvalidHoursValue {
            value: value.into(),
        }
    }

    /// Returns whether the error means the file content itself is unusable,
    /// as opposed to an I/O or input problem.
    #[must_use]
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::BadMagic { .. }
                | Self::UnsupportedVersion { .. }
                | Self::CorruptFile { .. }
                | Self::ReadError { .. }
                | Self::IncompleteRead { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_map_to_specific_kinds() {
        let err: DbError = StorageError::AlreadyExists {
            path: PathBuf::from("a.db"),
        }
        .into();
        assert!(matches!(err, DbError::FileExists { .. }));

        let err: DbError = StorageError::Locked.into();
        assert!(matches!(err, DbError::DatabaseLocked));

        let err: DbError = StorageError::Seek {
            offset: 12,
            source: io::Error::new(io::ErrorKind::Other, "boom"),
        }
        .into();
        assert!(matches!(err, DbError::SeekError { offset: 12, .. }));

        let err: DbError = StorageError::Io(io::Error::new(io::ErrorKind::Other, "boom")).into();
        assert!(matches!(err, DbError::Storage(_)));
    }

    #[test]
    fn corruption_classification() {
        assert!(DbError::BadMagic {
            expected: 1,
            actual: 2
        }
        .is_corruption());
        assert!(!DbError::invalid_hours("x").is_corruption());
    }

    #[test]
    fn messages_name_the_values() {
        let err = DbError::BadMagic {
            expected: 0x4C4C_4144,
            actual: 0,
        };
        assert_eq!(
            err.to_string(),
            "bad magic: expected 0x4c4c4144, got 0x00000000"
        );

        let err = DbError::UnsupportedVersion {
            expected: 1,
            version: 2,
        };
        assert_eq!(
            err.to_string(),
            "unsupported format version 2 (expected 1)"
        );
    }
}
