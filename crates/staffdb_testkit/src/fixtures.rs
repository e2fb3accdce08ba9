//! Test fixtures and database helpers.
//!
//! Provides temp-file databases and raw byte builders for hand-crafting
//! valid and damaged files.

use staffdb_core::{Config, Database, DbHeader, Employee};
use staffdb_storage::FileBackend;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A database path inside a temporary directory that is removed on drop.
pub struct TempDb {
    path: PathBuf,
    _temp_dir: TempDir,
}

impl TempDb {
    /// Reserves a fresh path; no file exists yet.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("employees.db");
        Self {
            path,
            _temp_dir: temp_dir,
        }
    }

    /// Returns the database file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the database file with default configuration.
    pub fn create(&self) -> Database<FileBackend> {
        Database::create(&self.path, Config::default()).expect("Failed to create database")
    }

    /// Opens the existing database file with default configuration.
    pub fn open(&self) -> Database<FileBackend> {
        Database::open(&self.path, Config::default()).expect("Failed to open database")
    }

    /// Replaces the file content with `bytes`.
    pub fn write_raw(&self, bytes: &[u8]) {
        fs::write(&self.path, bytes).expect("Failed to write raw database");
    }

    /// Returns the current file content.
    pub fn bytes(&self) -> Vec<u8> {
        fs::read(&self.path).expect("Failed to read database file")
    }

    /// Returns the current file length.
    pub fn file_len(&self) -> u64 {
        fs::metadata(&self.path)
            .expect("Failed to stat database file")
            .len()
    }
}

impl Default for TempDb {
    fn default() -> Self {
        Self::new()
    }
}

/// Encodes `header` and `employees` verbatim, without fixing up
/// `count` or `filesize`.
///
/// Useful for building files whose header lies about their content.
pub fn raw_db_bytes(header: &DbHeader, employees: &[Employee]) -> Vec<u8> {
    let mut bytes = header.encode().to_vec();
    for employee in employees {
        bytes.extend_from_slice(&employee.encode());
    }
    bytes
}

/// Returns a header that correctly describes `count` records.
pub fn header_with_count(count: u16) -> DbHeader {
    DbHeader {
        count,
        filesize: DbHeader::filesize_for(count),
        ..staffdb_core::create_header()
    }
}

/// Runs a test with a freshly created file database.
///
/// # Example
///
/// ```rust,ignore
/// use staffdb_testkit::with_temp_db;
///
/// #[test]
/// fn my_test() {
///     with_temp_db(|db, path| {
///         db.append("Ada,Main St,40").unwrap();
///         db.persist().unwrap();
///         assert!(path.exists());
///     });
/// }
/// ```
pub fn with_temp_db<F, R>(f: F) -> R
where
    F: FnOnce(&mut Database<FileBackend>, &Path) -> R,
{
    let temp = TempDb::new();
    let mut db = temp.create();
    f(&mut db, temp.path())
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;

    /// Creates and persists a database with `count` generated employees.
    pub fn populated_database(count: usize) -> TempDb {
        let temp = TempDb::new();
        let mut db = temp.create();

        for i in 0..count {
            let input = format!("Employee {i},{i} Main St,{}", i * 8);
            db.append(&input).expect("Failed to append employee");
        }
        db.persist().expect("Failed to persist database");

        temp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use staffdb_core::{HEADER_SIZE, RECORD_SIZE};

    #[test]
    fn temp_db_starts_without_file() {
        let temp = TempDb::new();
        assert!(!temp.path().exists());
    }

    #[test]
    fn test_with_temp_db() {
        with_temp_db(|db, path| {
            db.append("Ada,Main St,40").unwrap();
            db.persist().unwrap();
            assert!(path.exists());
        });
    }

    #[test]
    fn test_populated_scenario() {
        let temp = scenarios::populated_database(10);
        assert_eq!(temp.file_len(), (HEADER_SIZE + 10 * RECORD_SIZE) as u64);

        let db = temp.open();
        assert_eq!(db.employees().len(), 10);
        assert_eq!(db.employees()[3].hours, 24);
    }

    #[test]
    fn raw_bytes_keep_lying_header() {
        let bytes = raw_db_bytes(&header_with_count(5), &[Employee::new("a", "b", 1)]);
        assert_eq!(bytes.len(), HEADER_SIZE + RECORD_SIZE);
        assert_eq!(&bytes[6..8], &[0, 5]);
    }
}
