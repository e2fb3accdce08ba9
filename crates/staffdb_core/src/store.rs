//! Bulk record reading and whole-file rewriting.
//!
//! These are the only places bytes cross between the backend and memory,
//! so the codec runs exactly twice: right after a read, right before a
//! write.

use crate::error::{DbError, DbResult};
use crate::format::{HEADER_SIZE, RECORD_SIZE};
use crate::header::DbHeader;
use crate::record::Employee;
use staffdb_storage::StorageBackend;
use tracing::debug;

/// Reads exactly `header.count` records following the header.
///
/// A count of zero returns an empty vector without touching the backend.
/// Otherwise the record area is fetched with one bulk read and decoded in
/// full, or not at all.
///
/// # Errors
///
/// - [`DbError::CountOverflow`] if the byte length does not fit `usize`
/// - [`DbError::AllocationFailed`] if the buffer cannot be allocated
/// - [`DbError::SeekError`] if the cursor cannot be positioned
/// - [`DbError::IncompleteRead`] if fewer bytes than declared are available
pub fn read_employees<B>(backend: &mut B, header: &DbHeader) -> DbResult<Vec<Employee>>
where
    B: StorageBackend + ?Sized,
{
    let count = usize::from(header.count);
    if count == 0 {
        return Ok(Vec::new());
    }

    let len = count
        .checked_mul(RECORD_SIZE)
        .ok_or(DbError::CountOverflow { count })?;

    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| DbError::AllocationFailed { bytes: len })?;
    buf.resize(len, 0);

    backend.seek_to(HEADER_SIZE as u64)?;
    let read = backend.read(&mut buf)?;
    if read != len {
        return Err(DbError::IncompleteRead {
            expected: len,
            actual: read,
        });
    }

    let mut employees = Vec::new();
    employees
        .try_reserve_exact(count)
        .map_err(|_| DbError::AllocationFailed {
            bytes: count.saturating_mul(std::mem::size_of::<Employee>()),
        })?;
    for chunk in buf.chunks_exact(RECORD_SIZE) {
        employees.push(Employee::decode(chunk)?);
    }

    debug!(count, "read employee records");
    Ok(employees)
}

/// Rewrites the whole file: header at offset 0, then every record.
///
/// `filesize` is recomputed from `header.count`; the stored value is not
/// trusted. Records are encoded into temporary buffers, so `employees` is
/// never modified. On success the file is exactly as long as the
/// recomputed size.
///
/// The caller must have exclusive access to the backend. A failure part
/// way through leaves the file in an unspecified state.
///
/// # Errors
///
/// - [`DbError::CountMismatch`] if `employees.len() != header.count`
/// - [`DbError::SeekError`] if the cursor cannot be moved to 0
/// - [`DbError::ShortWrite`] if the backend accepts fewer bytes than given
pub fn output_file<B>(backend: &mut B, header: &DbHeader, employees: &[Employee]) -> DbResult<()>
where
    B: StorageBackend + ?Sized,
{
    if employees.len() != usize::from(header.count) {
        return Err(DbError::CountMismatch {
            header_count: header.count,
            records: employees.len(),
        });
    }

    let wire = DbHeader {
        filesize: DbHeader::filesize_for(header.count),
        ..*header
    };

    backend.seek_to(0)?;
    write_block(backend, &wire.encode())?;
    for employee in employees {
        write_block(backend, &employee.encode())?;
    }

    backend.set_len(u64::from(wire.filesize))?;
    backend.flush()?;

    debug!(
        count = wire.count,
        filesize = wire.filesize,
        "database written"
    );
    Ok(())
}

fn write_block<B>(backend: &mut B, block: &[u8]) -> DbResult<()>
where
    B: StorageBackend + ?Sized,
{
    let written = backend.write(block)?;
    if written != block.len() {
        return Err(DbError::ShortWrite {
            expected: block.len(),
            written,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{create_header, validate_header};
    use staffdb_storage::InMemoryBackend;

    fn header_for(count: u16) -> DbHeader {
        DbHeader {
            count,
            filesize: DbHeader::filesize_for(count),
            ..create_header()
        }
    }

    fn staff() -> Vec<Employee> {
        vec![
            Employee::new("Ada", "Main St", 40),
            Employee::new("Grace", "Navy Yard", 0),
            Employee::new("Linus", "Helsinki", 1_000_000),
        ]
    }

    #[test]
    fn empty_count_reads_nothing() {
        let mut backend = InMemoryBackend::new();
        backend.set_fail_seeks(true);
        let employees = read_employees(&mut backend, &create_header()).unwrap();
        assert!(employees.is_empty());
    }

    #[test]
    fn write_then_read_roundtrip() {
        let employees = staff();
        let header = header_for(3);
        let mut backend = InMemoryBackend::new();

        output_file(&mut backend, &header, &employees).unwrap();
        assert_eq!(
            backend.size().unwrap(),
            (HEADER_SIZE + 3 * RECORD_SIZE) as u64
        );

        let validated = validate_header(&mut backend).unwrap();
        assert_eq!(validated, header);
        assert_eq!(read_employees(&mut backend, &validated).unwrap(), employees);
    }

    #[test]
    fn write_recomputes_stale_filesize() {
        let header = DbHeader {
            filesize: 9999,
            ..header_for(1)
        };
        let mut backend = InMemoryBackend::new();

        output_file(&mut backend, &header, &staff()[..1]).unwrap();
        let validated = validate_header(&mut backend).unwrap();
        assert_eq!(validated.filesize, DbHeader::filesize_for(1));
    }

    #[test]
    fn write_shrinks_longer_file() {
        let mut backend = InMemoryBackend::with_data(vec![0xAA; 4096]);
        output_file(&mut backend, &create_header(), &[]).unwrap();
        assert_eq!(backend.data(), create_header().encode().to_vec());
    }

    #[test]
    fn write_keeps_caller_records_in_host_order() {
        let employees = staff();
        let before = employees.clone();
        let mut backend = InMemoryBackend::new();

        output_file(&mut backend, &header_for(3), &employees).unwrap();
        assert_eq!(employees, before);
    }

    #[test]
    fn write_rejects_count_mismatch() {
        let mut backend = InMemoryBackend::new();
        let result = output_file(&mut backend, &header_for(2), &staff());
        assert!(matches!(
            result,
            Err(DbError::CountMismatch {
                header_count: 2,
                records: 3
            })
        ));
        assert_eq!(backend.size().unwrap(), 0);
    }

    #[test]
    fn short_header_write_is_reported() {
        let mut backend = InMemoryBackend::with_write_limit(8);
        let result = output_file(&mut backend, &create_header(), &[]);
        assert!(matches!(
            result,
            Err(DbError::ShortWrite {
                expected: 12,
                written: 8
            })
        ));
    }

    #[test]
    fn short_record_write_is_reported() {
        let limit = (HEADER_SIZE + RECORD_SIZE + 10) as u64;
        let mut backend = InMemoryBackend::with_write_limit(limit);
        let result = output_file(&mut backend, &header_for(3), &staff());
        assert!(matches!(
            result,
            Err(DbError::ShortWrite {
                expected: RECORD_SIZE,
                written: 10
            })
        ));
    }

    #[test]
    fn seek_failure_is_distinct_from_short_write() {
        let mut backend = InMemoryBackend::new();
        backend.set_fail_seeks(true);
        let result = output_file(&mut backend, &create_header(), &[]);
        assert!(matches!(result, Err(DbError::SeekError { offset: 0, .. })));
    }

    #[test]
    fn read_reports_seek_failure() {
        let header = header_for(3);
        let mut backend = InMemoryBackend::new();
        output_file(&mut backend, &header, &staff()).unwrap();

        backend.set_fail_seeks(true);
        let result = read_employees(&mut backend, &header);
        assert!(matches!(
            result,
            Err(DbError::SeekError { offset, .. }) if offset == HEADER_SIZE as u64
        ));
    }

    #[test]
    fn declared_count_beyond_data_is_incomplete() {
        let mut data = header_for(5).encode().to_vec();
        for employee in &staff()[..2] {
            data.extend_from_slice(&employee.encode());
        }
        let mut backend = InMemoryBackend::with_data(data);

        let result = read_employees(&mut backend, &header_for(5));
        assert!(matches!(
            result,
            Err(DbError::IncompleteRead {
                expected,
                actual
            }) if expected == 5 * RECORD_SIZE && actual == 2 * RECORD_SIZE
        ));
    }

    #[test]
    fn header_only_file_with_count_is_incomplete() {
        let mut backend = InMemoryBackend::with_data(header_for(1).encode().to_vec());
        let result = read_employees(&mut backend, &header_for(1));
        assert!(matches!(
            result,
            Err(DbError::IncompleteRead { actual: 0, .. })
        ));
    }
}
