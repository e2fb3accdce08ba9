//! # StaffDB Testkit
//!
//! Test utilities for StaffDB.
//!
//! This crate provides:
//! - Temp-file fixtures and raw file builders
//! - Property-based test generators using proptest
//! - Byte-exact test vectors for the on-disk format
//!
//! ## Usage
//!
//! ```rust,ignore
//! use staffdb_testkit::prelude::*;
//!
//! #[test]
//! fn test_with_database() {
//!     with_temp_db(|db, _path| {
//!         db.append("Ada,Main St,40").unwrap();
//!     });
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod vectors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::vectors::*;
}

pub use fixtures::*;
pub use generators::*;
pub use vectors::*;
