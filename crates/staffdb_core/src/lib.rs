//! # StaffDB Core
//!
//! A flat-file employee record store.
//!
//! A database is a single file: a fixed 12-byte header followed by
//! `count` fixed 516-byte employee records, all integers big-endian.
//! This crate provides:
//! - The on-disk layout and its host/wire codec
//! - Header creation and validation
//! - Bulk record reading and whole-file rewriting
//! - Parsing `"name,address,hours"` input into records
//! - A [`Database`] handle tying the steps together
//!
//! ## Exclusive access
//!
//! Every operation assumes the calling process is the only writer of the
//! file for the duration of the call. Changes made by another process
//! between validation and a write are not detected, except through the
//! size check on the next open. Set [`Config::lock`] to take an advisory
//! lock.
//!
//! ## Example
//!
//! ```rust
//! use staffdb_core::{Config, Database};
//! use staffdb_storage::InMemoryBackend;
//!
//! let mut db = Database::create_with_backend(InMemoryBackend::new(), Config::default()).unwrap();
//! db.append("Ada,Main St,40").unwrap();
//! db.persist().unwrap();
//! assert_eq!(db.header().count, 1);
//! assert_eq!(db.employees()[0].name_str(), "Ada");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod database;
mod error;
mod format;
mod header;
mod mutate;
mod record;
mod store;

pub use config::Config;
pub use database::Database;
pub use error::{DbError, DbResult};
pub use format::{
    ADDRESS_LEN, FORMAT_VERSION, HEADER_MAGIC, HEADER_SIZE, MAX_RECORDS, NAME_LEN, RECORD_SIZE,
};
pub use header::{create_header, validate_header, DbHeader};
pub use mutate::{add_employee, append_employee};
pub use record::{Employee, Truncation};
pub use store::{output_file, read_employees};

/// Crate version, reported by `staffdb --version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
