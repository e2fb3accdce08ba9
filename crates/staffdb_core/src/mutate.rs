//! Parsing `"name,address,hours"` input into records.

use crate::error::{DbError, DbResult};
use crate::format::MAX_RECORDS;
use crate::header::DbHeader;
use crate::record::{Employee, Truncation};
use tracing::{debug, warn};

/// Parses `add_string` and stores the result at `employees[index]`.
///
/// The input must hold exactly three non-empty comma-separated fields:
/// name, address and hours. Name and address are cut to their field
/// capacity; hours must be a decimal integer that fits in a `u32`
/// (surrounding ASCII whitespace is ignored).
///
/// The sequence is never grown here; the caller extends it first (see
/// [`append_employee`]). Nothing is modified unless the call succeeds.
///
/// # Errors
///
/// - [`DbError::IndexOutOfRange`] if `index` is not below both
///   `employees.len()` and `header.count`
/// - [`DbError::MalformedInput`] if the field count is not three
/// - [`DbError::InvalidHoursValue`] if hours is not a valid `u32`
pub fn add_employee(
    header: &DbHeader,
    employees: &mut [Employee],
    add_string: &str,
    index: usize,
) -> DbResult<Truncation> {
    let len = employees.len().min(usize::from(header.count));
    if index >= len {
        return Err(DbError::IndexOutOfRange { index, len });
    }

    let (name, address, hours) = split_fields(add_string)?;
    let hours = parse_hours(hours)?;

    let mut employee = Employee {
        hours,
        ..Employee::default()
    };
    let truncation = Truncation {
        name: employee.set_name(name),
        address: employee.set_address(address),
    };
    if truncation.any() {
        warn!(index, ?truncation, "employee text truncated to field capacity");
    }

    employees[index] = employee;
    debug!(index, hours, "employee stored");
    Ok(truncation)
}

/// Grows the sequence by one record and fills it from `add_string`.
///
/// On success `header.count` and `header.filesize` describe the grown
/// sequence. On failure both the header and the sequence are restored.
///
/// # Errors
///
/// - [`DbError::CountMismatch`] if `employees.len() != header.count`
/// - [`DbError::CountOverflow`] if the database already holds [`MAX_RECORDS`] records
/// - [`DbError::AllocationFailed`] if the sequence cannot grow
/// - any error of [`add_employee`]
pub fn append_employee(
    header: &mut DbHeader,
    employees: &mut Vec<Employee>,
    add_string: &str,
) -> DbResult<Truncation> {
    if employees.len() != usize::from(header.count) {
        return Err(DbError::CountMismatch {
            header_count: header.count,
            records: employees.len(),
        });
    }

    if usize::from(header.count) >= MAX_RECORDS {
        return Err(DbError::CountOverflow {
            count: MAX_RECORDS + 1,
        });
    }
    let count = header.count + 1;

    employees
        .try_reserve(1)
        .map_err(|_| DbError::AllocationFailed {
            bytes: std::mem::size_of::<Employee>(),
        })?;
    employees.push(Employee::default());

    let previous = *header;
    header.count = count;
    let index = employees.len() - 1;

    match add_employee(header, employees, add_string, index) {
        Ok(truncation) => {
            header.filesize = DbHeader::filesize_for(count);
            Ok(truncation)
        }
        Err(err) => {
            employees.pop();
            *header = previous;
            Err(err)
        }
    }
}

fn split_fields(input: &str) -> DbResult<(&str, &str, &str)> {
    let fields: Vec<&str> = input.split(',').collect();
    match fields.as_slice() {
        [name, address, hours] if !name.is_empty() && !address.is_empty() && !hours.is_empty() => {
            Ok((*name, *address, *hours))
        }
        _ => Err(DbError::MalformedInput {
            fields: fields.len(),
            empty: fields.iter().filter(|f| f.is_empty()).count(),
        }),
    }
}

fn parse_hours(text: &str) -> DbResult<u32> {
    let digits = text.trim_matches(|c: char| c.is_ascii_whitespace());
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DbError::invalid_hours(text));
    }
    digits.parse().map_err(|_| DbError::invalid_hours(text))
}
