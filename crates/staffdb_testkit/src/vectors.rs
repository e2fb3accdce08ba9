//! Byte-exact test vectors for the on-disk format.
//!
//! These vectors pin the wire layout so that any other reader or writer
//! of StaffDB files can be checked against the same bytes.

use serde::{Deserialize, Serialize};
use staffdb_core::{create_header, DbHeader, Employee};

/// A test vector that can be shared with other implementations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Encoded bytes (hex).
    pub encoded_hex: String,
    /// Expected failure kind when the bytes are opened as a database.
    pub expected_error: Option<String>,
}

/// Header encoding vectors.
pub fn header_vectors() -> Vec<TestVector> {
    vec![
        TestVector {
            id: "header_empty".into(),
            description: "Header of a new database".into(),
            encoded_hex: "4c4c4144000100000000000c".into(),
            expected_error: None,
        },
        TestVector {
            id: "header_bad_magic".into(),
            description: "Header with zero magic".into(),
            encoded_hex: "00000000000100000000000c".into(),
            expected_error: Some("BadMagic".into()),
        },
        TestVector {
            id: "header_version_2".into(),
            description: "Header with unsupported version".into(),
            encoded_hex: "4c4c4144000200000000000c".into(),
            expected_error: Some("UnsupportedVersion".into()),
        },
        TestVector {
            id: "header_count_1_no_records".into(),
            description: "Header declaring one record over a header-only file".into(),
            encoded_hex: "4c4c41440001000100000210".into(),
            expected_error: Some("CorruptFile".into()),
        },
    ]
}

/// Record encoding vectors, as `(employee, hours field hex)` pairs.
///
/// Only the trailing hours field is pinned; text fields are raw bytes.
pub fn record_hours_vectors() -> Vec<(Employee, &'static str)> {
    vec![
        (Employee::new("Ada", "Main St", 40), "00000028"),
        (Employee::new("Max", "Edge", u32::MAX), "ffffffff"),
        (Employee::new("Big", "Endian", 0x0102_0304), "01020304"),
    ]
}

/// Returns the header a new database carries, for vector checks.
pub fn empty_header() -> DbHeader {
    create_header()
}

/// Serializes all header vectors as pretty JSON.
pub fn header_vectors_json() -> String {
    serde_json::to_string_pretty(&header_vectors()).expect("Failed to serialize vectors")
}

/// Hex-encodes bytes.
pub fn hex_encode(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Decodes hex, returning `None` on malformed input.
pub fn hex_decode(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}
