//! Benchmark utilities.

#![warn(missing_docs)]

use staffdb_core::{DbHeader, Employee};
use staffdb_storage::InMemoryBackend;

/// Generate `count` employees with distinct names and hours.
pub fn generate_employees(count: usize) -> Vec<Employee> {
    (0..count)
        .map(|i| {
            Employee::new(
                &format!("Employee {i}"),
                &format!("{i} Benchmark Avenue"),
                (i as u32).wrapping_mul(7),
            )
        })
        .collect()
}

/// Header describing `count` records.
pub fn header_for(count: usize) -> DbHeader {
    let count = u16::try_from(count).unwrap_or(u16::MAX);
    DbHeader {
        count,
        filesize: DbHeader::filesize_for(count),
        ..staffdb_core::create_header()
    }
}

/// An in-memory database file holding `count` generated employees.
pub fn populated_backend(count: usize) -> InMemoryBackend {
    let employees = generate_employees(count);
    let mut backend = InMemoryBackend::new();
    staffdb_core::output_file(&mut backend, &header_for(count), &employees)
        .expect("Failed to build benchmark database");
    backend
}
