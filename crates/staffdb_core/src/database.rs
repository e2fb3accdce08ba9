//! The database handle: open or create, load, append, persist.

use crate::config::Config;
use crate::error::DbResult;
use crate::header::{create_header, validate_header, DbHeader};
use crate::mutate::append_employee;
use crate::record::{Employee, Truncation};
use crate::store::{output_file, read_employees};
use staffdb_storage::{FileBackend, StorageBackend};
use std::path::Path;
use tracing::{debug, info, warn};

/// An open database: its backend plus the in-memory header and records.
///
/// Mutations only touch memory until [`Database::persist`] rewrites the
/// whole file. The handle owns the backend, so the file is closed (and
/// any advisory lock released) when it is dropped, on every exit path.
///
/// # Exclusive access
///
/// The handle assumes no other process modifies the file while it is
/// open. Enable [`Config::lock`] to have cooperating processes enforce
/// that.
///
/// # Example
///
/// ```rust,no_run
/// use staffdb_core::{Config, Database};
/// use std::path::Path;
///
/// let mut db = Database::open(Path::new("employees.db"), Config::default())?;
/// db.append("Ada,Main St,40")?;
/// db.persist()?;
/// # Ok::<(), staffdb_core::DbError>(())
/// ```
#[derive(Debug)]
pub struct Database<B = FileBackend> {
    backend: B,
    header: DbHeader,
    employees: Vec<Employee>,
    config: Config,
}

impl Database<FileBackend> {
    /// Creates a new database file at `path` and writes an empty database.
    ///
    /// An existing file is left untouched. If locking or the initial write
    /// fails, the newly created file is removed again.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DbError::FileExists`] if `path` already exists,
    /// [`crate::DbError::DatabaseLocked`] if locking is enabled and fails,
    /// or any write error.
    pub fn create(path: &Path, config: Config) -> DbResult<Self> {
        let backend = FileBackend::create_new(path)?;
        info!(path = %path.display(), "creating database");
        let created = if config.lock {
            backend
                .try_lock_exclusive()
                .map_err(Into::into)
                .and_then(|()| Self::create_with_backend(backend, config))
        } else {
            Self::create_with_backend(backend, config)
        };
        discard_on_error(path, created)
    }

    /// Opens and validates an existing database file, loading all records.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DbError::OpenFailed`] if the file cannot be opened,
    /// [`crate::DbError::DatabaseLocked`] if locking is enabled and fails,
    /// or any validation or read error.
    pub fn open(path: &Path, config: Config) -> DbResult<Self> {
        let backend = if config.read_only {
            FileBackend::open_read_only(path)?
        } else {
            FileBackend::open(path)?
        };
        if config.lock {
            backend.try_lock_exclusive()?;
        }
        info!(path = %path.display(), "opening database");
        Self::open_with_backend(backend, config)
    }
}

impl<B: StorageBackend> Database<B> {
    /// Initialises an empty database on `backend`, overwriting its content.
    ///
    /// # Errors
    ///
    /// Returns an error if the empty database cannot be written.
    pub fn create_with_backend(backend: B, config: Config) -> DbResult<Self> {
        let mut db = Self {
            backend,
            header: create_header(),
            employees: Vec::new(),
            config,
        };
        db.persist()?;
        Ok(db)
    }

    /// Validates the header on `backend` and loads every record.
    ///
    /// # Errors
    ///
    /// Returns any error of [`validate_header`] or [`read_employees`].
    pub fn open_with_backend(mut backend: B, config: Config) -> DbResult<Self> {
        let header = validate_header(&mut backend)?;
        let employees = read_employees(&mut backend, &header)?;
        debug!(count = employees.len(), "database loaded");
        Ok(Self {
            backend,
            header,
            employees,
            config,
        })
    }

    /// Returns the in-memory header.
    #[must_use]
    pub fn header(&self) -> &DbHeader {
        &self.header
    }

    /// Returns the in-memory records, indexed by employee ID.
    #[must_use]
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Appends one employee parsed from `"name,address,hours"`.
    ///
    /// Only memory changes; call [`Database::persist`] to write it out.
    ///
    /// # Errors
    ///
    /// Returns any error of [`append_employee`]; memory is unchanged then.
    pub fn append(&mut self, add_string: &str) -> DbResult<Truncation> {
        append_employee(&mut self.header, &mut self.employees, add_string)
    }

    /// Rewrites the file from the in-memory header and records.
    ///
    /// # Errors
    ///
    /// Returns any error of [`output_file`], or a sync failure.
    pub fn persist(&mut self) -> DbResult<()> {
        output_file(&mut self.backend, &self.header, &self.employees)?;
        if self.config.sync_on_write {
            self.backend.sync()?;
        }
        self.header.filesize = DbHeader::filesize_for(self.header.count);
        Ok(())
    }

    /// Consumes the handle, returning the backend, header and records.
    #[must_use]
    pub fn into_parts(self) -> (B, DbHeader, Vec<Employee>) {
        (self.backend, self.header, self.employees)
    }
}

/// Removes the file at `path` when `result` is an error.
fn discard_on_error<T>(path: &Path, result: DbResult<T>) -> DbResult<T> {
    if result.is_err() {
        if let Err(err) = std::fs::remove_file(path) {
            warn!(path = %path.display(), %err, "failed to remove partially created database");
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::format::{HEADER_SIZE, RECORD_SIZE};
    use staffdb_storage::InMemoryBackend;

    #[test]
    fn create_writes_empty_database() {
        let db = Database::create_with_backend(InMemoryBackend::new(), Config::default()).unwrap();
        let (backend, header, employees) = db.into_parts();

        assert_eq!(header, create_header());
        assert!(employees.is_empty());
        assert_eq!(backend.data(), create_header().encode().to_vec());
    }

    #[test]
    fn append_persist_reopen() {
        let mut db =
            Database::create_with_backend(InMemoryBackend::new(), Config::default()).unwrap();
        db.append("Ada,Main St,40").unwrap();
        db.append("Grace,Navy Yard,12").unwrap();
        db.persist().unwrap();

        let (backend, _, _) = db.into_parts();
        assert_eq!(
            backend.size().unwrap(),
            (HEADER_SIZE + 2 * RECORD_SIZE) as u64
        );

        let db = Database::open_with_backend(backend, Config::default()).unwrap();
        assert_eq!(db.header().count, 2);
        assert_eq!(db.employees()[1].name_str(), "Grace");
        assert_eq!(db.employees()[1].hours, 12);
    }

    #[test]
    fn failed_append_leaves_memory_unchanged() {
        let mut db =
            Database::create_with_backend(InMemoryBackend::new(), Config::default()).unwrap();
        let result = db.append("Name,Addr,notanumber");

        assert!(matches!(result, Err(DbError::InvalidHoursValue { .. })));
        assert_eq!(db.header().count, 0);
        assert!(db.employees().is_empty());
    }

    #[test]
    fn failed_create_removes_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("staff.db");
        std::fs::write(&path, b"").unwrap();

        let result: DbResult<()> = discard_on_error(&path, Err(DbError::DatabaseLocked));
        assert!(matches!(result, Err(DbError::DatabaseLocked)));
        assert!(!path.exists());
    }

    #[test]
    fn successful_create_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("staff.db");

        let db = Database::create(&path, Config::default()).unwrap();
        drop(db);
        assert_eq!(
            std::fs::read(&path).unwrap(),
            create_header().encode().to_vec()
        );
    }

    #[test]
    fn open_rejects_garbage() {
        let backend = InMemoryBackend::with_data(b"not a database".to_vec());
        let result = Database::open_with_backend(backend, Config::default());
        assert!(matches!(result, Err(DbError::BadMagic { .. })));
    }
}
