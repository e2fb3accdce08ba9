//! Employee records and their wire codec.

use crate::error::{DbError, DbResult};
use crate::format::{ADDRESS_LEN, ADDRESS_OFFSET, HOURS_OFFSET, NAME_LEN, NAME_OFFSET, RECORD_SIZE};
use std::borrow::Cow;
use std::fmt;

/// One fixed-size employee entry.
///
/// Text fields hold raw bytes exactly as stored on disk: NUL-terminated
/// and zero-padded. Records carry no identifier; an employee's ID is its
/// position in the record sequence.
#[derive(Clone, PartialEq, Eq)]
pub struct Employee {
    /// Employee name, NUL-terminated.
    pub name: [u8; NAME_LEN],
    /// Employee address, NUL-terminated.
    pub address: [u8; ADDRESS_LEN],
    /// Hours worked.
    pub hours: u32,
}

/// Which text fields were cut to fit their capacity.
///
/// The wire format stays the same; truncation is reported instead of
/// happening silently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Truncation {
    /// The name was longer than `NAME_LEN - 1` bytes.
    pub name: bool,
    /// The address was longer than `ADDRESS_LEN - 1` bytes.
    pub address: bool,
}

impl Truncation {
    /// Returns whether any field was truncated.
    #[must_use]
    pub const fn any(self) -> bool {
        self.name || self.address
    }
}

impl Default for Employee {
    fn default() -> Self {
        Self {
            name: [0; NAME_LEN],
            address: [0; ADDRESS_LEN],
            hours: 0,
        }
    }
}

impl fmt::Debug for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Employee")
            .field("name", &self.name_str())
            .field("address", &self.address_str())
            .field("hours", &self.hours)
            .finish()
    }
}

impl Employee {
    /// Creates a record, truncating text that does not fit.
    #[must_use]
    pub fn new(name: &str, address: &str, hours: u32) -> Self {
        let mut employee = Self {
            hours,
            ..Self::default()
        };
        let _ = employee.set_name(name);
        let _ = employee.set_address(address);
        employee
    }

    /// Replaces the name. Returns `true` if it had to be truncated.
    pub fn set_name(&mut self, name: &str) -> bool {
        fill_text(&mut self.name, name)
    }

    /// Replaces the address. Returns `true` if it had to be truncated.
    pub fn set_address(&mut self, address: &str) -> bool {
        fill_text(&mut self.address, address)
    }

    /// Returns the name up to its NUL terminator.
    #[must_use]
    pub fn name_str(&self) -> Cow<'_, str> {
        text_of(&self.name)
    }

    /// Returns the address up to its NUL terminator.
    #[must_use]
    pub fn address_str(&self) -> Cow<'_, str> {
        text_of(&self.address)
    }

    /// Encodes the record to its wire form.
    ///
    /// Works on a copy: the in-memory record keeps its host-order values.
    #[must_use]
    pub fn encode(&self) -> [u8; RECORD_SIZE] {
        let mut buf = [0u8; RECORD_SIZE];
        buf[NAME_OFFSET..ADDRESS_OFFSET].copy_from_slice(&self.name);
        buf[ADDRESS_OFFSET..HOURS_OFFSET].copy_from_slice(&self.address);
        buf[HOURS_OFFSET..].copy_from_slice(&self.hours.to_be_bytes());
        buf
    }

    /// Decodes a record from its wire form.
    ///
    /// Only the first [`RECORD_SIZE`] bytes are looked at.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::IncompleteRead`] if `data` is shorter than a record.
    pub fn decode(data: &[u8]) -> DbResult<Self> {
        if data.len() < RECORD_SIZE {
            return Err(DbError::IncompleteRead {
                expected: RECORD_SIZE,
                actual: data.len(),
            });
        }

        let mut employee = Self::default();
        employee
            .name
            .copy_from_slice(&data[NAME_OFFSET..ADDRESS_OFFSET]);
        employee
            .address
            .copy_from_slice(&data[ADDRESS_OFFSET..HOURS_OFFSET]);
        employee.hours = u32::from_be_bytes([
            data[HOURS_OFFSET],
            data[HOURS_OFFSET + 1],
            data[HOURS_OFFSET + 2],
            data[HOURS_OFFSET + 3],
        ]);
        Ok(employee)
    }
}

/// Copies `src` into `dst`, keeping at least one trailing NUL.
///
/// Cuts on a UTF-8 character boundary. Returns `true` if bytes were dropped.
fn fill_text(dst: &mut [u8], src: &str) -> bool {
    let cap = dst.len().saturating_sub(1);
    let mut end = src.len().min(cap);
    while !src.is_char_boundary(end) {
        end -= 1;
    }

    dst.fill(0);
    dst[..end].copy_from_slice(&src.as_bytes()[..end]);
    end < src.len()
}

fn text_of(field: &[u8]) -> Cow<'_, str> {
    let len = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..len])
}
