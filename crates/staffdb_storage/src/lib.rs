//! # StaffDB Storage
//!
//! File handle abstraction and implementations for StaffDB.
//!
//! This crate provides the lowest-level storage abstraction for StaffDB.
//! Backends behave like an open file descriptor: a cursor that can be
//! positioned, read from and written to. They do not interpret the bytes
//! they hold.
//!
//! ## Design Principles
//!
//! - Backends are cursor-based byte stores (seek, read, write, resize)
//! - Short reads and short writes are reported, never hidden
//! - No knowledge of StaffDB headers or records
//! - StaffDB core owns all file format interpretation
//!
//! ## Available Backends
//!
//! - [`InMemoryBackend`] - For testing and ephemeral storage
//! - [`FileBackend`] - For persistent storage using OS file APIs
//!
//! ## Example
//!
//! ```rust
//! use staffdb_storage::{StorageBackend, InMemoryBackend};
//!
//! let mut backend = InMemoryBackend::new();
//! backend.write(b"hello world").unwrap();
//! backend.seek_to(6).unwrap();
//! let mut buf = [0u8; 5];
//! assert_eq!(backend.read(&mut buf).unwrap(), 5);
//! assert_eq!(&buf, b"world");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod memory;

pub use backend::StorageBackend;
pub use error::{StorageError, StorageResult};
pub use file::FileBackend;
pub use memory::InMemoryBackend;
