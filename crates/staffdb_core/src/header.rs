//! Database header: creation, codec and validation.

use crate::error::{DbError, DbResult};
use crate::format::{FORMAT_VERSION, HEADER_MAGIC, HEADER_SIZE, RECORD_SIZE};
use staffdb_storage::StorageBackend;
use tracing::{debug, warn};

/// The fixed-size block at offset 0 of every database file.
///
/// In memory all fields are host-order values. Byte order only changes
/// inside [`DbHeader::encode`] and [`DbHeader::decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbHeader {
    /// Format identifier, [`HEADER_MAGIC`] for valid files.
    pub magic: u32,
    /// Format version, [`FORMAT_VERSION`] for valid files.
    pub version: u16,
    /// Number of records following the header.
    pub count: u16,
    /// Total file size in bytes the header claims.
    pub filesize: u32,
}

impl Default for DbHeader {
    fn default() -> Self {
        create_header()
    }
}

impl DbHeader {
    /// Returns the exact size of a file holding `count` records.
    #[must_use]
    pub const fn filesize_for(count: u16) -> u32 {
        // Cannot overflow: see `MAX_FILE_SIZE`.
        HEADER_SIZE as u32 + count as u32 * RECORD_SIZE as u32
    }

    /// Returns whether `filesize` agrees with `count`.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.filesize == Self::filesize_for(self.count)
    }

    /// Encodes the header to its big-endian wire form.
    #[must_use]
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        buf[0..4].copy_from_slice(&self.magic.to_be_bytes());
        buf[4..6].copy_from_slice(&self.version.to_be_bytes());
        buf[6..8].copy_from_slice(&self.count.to_be_bytes());
        buf[8..12].copy_from_slice(&self.filesize.to_be_bytes());
        buf
    }

    /// Decodes a header from its wire form.
    ///
    /// Only the first [`HEADER_SIZE`] bytes are looked at. No field is
    /// checked here; see [`validate_header`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError::ReadError`] if `data` is shorter than a header.
    pub fn decode(data: &[u8]) -> DbResult<Self> {
        if data.len() < HEADER_SIZE {
            return Err(DbError::ReadError {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }

        Ok(Self {
            magic: u32::from_be_bytes([data[0], data[1], data[2], data[3]]),
            version: u16::from_be_bytes([data[4], data[5]]),
            count: u16::from_be_bytes([data[6], data[7]]),
            filesize: u32::from_be_bytes([data[8], data[9], data[10], data[11]]),
        })
    }
}

/// Returns the header of a new, empty database.
///
/// Pure constructor: no I/O, never fails.
#[must_use]
pub const fn create_header() -> DbHeader {
    DbHeader {
        magic: HEADER_MAGIC,
        version: FORMAT_VERSION,
        count: 0,
        filesize: HEADER_SIZE as u32,
    }
}

/// Reads and checks the header of an existing database.
///
/// Seeks to offset 0, reads one header, then checks in order: magic,
/// version, that the backend's actual size equals `filesize`, and that
/// `filesize` is exactly the size `count` records occupy.
///
/// The caller must have exclusive access to the backend for the duration
/// of the call.
///
/// # Errors
///
/// - [`DbError::SeekError`] if the cursor cannot be moved to 0
/// - [`DbError::ReadError`] if fewer than [`HEADER_SIZE`] bytes exist
/// - [`DbError::BadMagic`] if the magic number is wrong
/// - [`DbError::UnsupportedVersion`] if the version is not 1
/// - [`DbError::CorruptFile`] if the file size disagrees with the header,
///   or the header's size disagrees with its own count
pub fn validate_header<B>(backend: &mut B) -> DbResult<DbHeader>
where
    B: StorageBackend + ?Sized,
{
    backend.seek_to(0)?;

    let mut buf = [0u8; HEADER_SIZE];
    let read = backend.read(&mut buf)?;
    if read != HEADER_SIZE {
        warn!(read, "database shorter than its header");
        return Err(DbError::ReadError {
            expected: HEADER_SIZE,
            actual: read,
        });
    }

    let header = DbHeader::decode(&buf)?;

    if header.magic != HEADER_MAGIC {
        warn!(magic = header.magic, "bad header magic");
        return Err(DbError::BadMagic {
            expected: HEADER_MAGIC,
            actual: header.magic,
        });
    }

    if header.version != FORMAT_VERSION {
        warn!(version = header.version, "unsupported header version");
        return Err(DbError::UnsupportedVersion {
            expected: FORMAT_VERSION,
            version: header.version,
        });
    }

    let actual = backend.size()?;
    if u64::from(header.filesize) != actual {
        warn!(
            declared = header.filesize,
            actual, "database size does not match header"
        );
        return Err(DbError::CorruptFile {
            declared: u64::from(header.filesize),
            actual,
        });
    }

    if !header.is_consistent() {
        let declared = u64::from(DbHeader::filesize_for(header.count));
        warn!(
            count = header.count,
            filesize = header.filesize,
            "header count does not match its file size"
        );
        return Err(DbError::CorruptFile { declared, actual });
    }

    debug!(count = header.count, filesize = header.filesize, "header validated");
    Ok(header)
}
