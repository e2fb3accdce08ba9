//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random test data
//! that maintains required invariants.

use proptest::prelude::*;
use staffdb_core::{DbHeader, Employee, ADDRESS_LEN, NAME_LEN};

/// Strategy for text that fits a field of `capacity` bytes without truncation
/// and contains no commas or NUL bytes.
pub fn field_text_strategy(capacity: usize) -> impl Strategy<Value = String> {
    let max = capacity.saturating_sub(1).min(64);
    prop::string::string_regex(&format!("[a-zA-Z0-9 .'-]{{1,{max}}}"))
        .expect("Invalid regex")
}

/// Strategy for arbitrary text, including input longer than any field.
pub fn oversized_text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[^,\\x00]{0,600}").expect("Invalid regex")
}

/// Strategy for valid employee records.
pub fn employee_strategy() -> impl Strategy<Value = Employee> {
    (
        field_text_strategy(NAME_LEN),
        field_text_strategy(ADDRESS_LEN),
        any::<u32>(),
    )
        .prop_map(|(name, address, hours)| Employee::new(&name, &address, hours))
}

/// Strategy for records with arbitrary raw field bytes.
pub fn raw_employee_strategy() -> impl Strategy<Value = Employee> {
    (
        prop::collection::vec(any::<u8>(), NAME_LEN),
        prop::collection::vec(any::<u8>(), ADDRESS_LEN),
        any::<u32>(),
    )
        .prop_map(|(name, address, hours)| {
            let mut employee = Employee {
                hours,
                ..Employee::default()
            };
            employee.name.copy_from_slice(&name);
            employee.address.copy_from_slice(&address);
            employee
        })
}

/// Strategy for record sequences of up to `max_len` entries.
pub fn employees_strategy(max_len: usize) -> impl Strategy<Value = Vec<Employee>> {
    prop::collection::vec(employee_strategy(), 0..=max_len)
}

/// Strategy for headers with arbitrary field values.
pub fn header_strategy() -> impl Strategy<Value = DbHeader> {
    (any::<u32>(), any::<u16>(), any::<u16>(), any::<u32>()).prop_map(
        |(magic, version, count, filesize)| DbHeader {
            magic,
            version,
            count,
            filesize,
        },
    )
}

/// Strategy for well-formed `"name,address,hours"` input.
///
/// Yields the input string together with the expected parsed fields.
pub fn add_string_strategy() -> impl Strategy<Value = (String, String, String, u32)> {
    (
        field_text_strategy(NAME_LEN),
        field_text_strategy(ADDRESS_LEN),
        any::<u32>(),
    )
        .prop_map(|(name, address, hours)| {
            let input = format!("{name},{address},{hours}");
            (input, name, address, hours)
        })
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
