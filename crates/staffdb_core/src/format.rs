//! On-disk layout constants.
//!
//! ```text
//! Header (12 bytes):  magic u32 | version u16 | count u16 | filesize u32
//! Record (516 bytes): name [u8; 256] | address [u8; 256] | hours u32
//! ```
//!
//! Integers are big-endian. The header sits at offset 0 and is followed by
//! `count` records with no padding and no trailing data.

/// Magic number at offset 0 ("LLAD").
pub const HEADER_MAGIC: u32 = 0x4C4C_4144;

/// The only format version this crate reads or writes.
pub const FORMAT_VERSION: u16 = 1;

/// Capacity of the name field, including the NUL terminator.
pub const NAME_LEN: usize = 256;

/// Capacity of the address field, including the NUL terminator.
pub const ADDRESS_LEN: usize = 256;

/// Encoded header size in bytes.
pub const HEADER_SIZE: usize = 4 + 2 + 2 + 4;

/// Encoded record size in bytes.
pub const RECORD_SIZE: usize = NAME_LEN + ADDRESS_LEN + 4;

/// Largest record count the 16-bit `count` field can hold.
pub const MAX_RECORDS: usize = u16::MAX as usize;

/// Size of a file holding [`MAX_RECORDS`] records.
pub(crate) const MAX_FILE_SIZE: usize = HEADER_SIZE + MAX_RECORDS * RECORD_SIZE;

// `filesize` is a u32 field; a full database must still fit.
const _: () = assert!(MAX_FILE_SIZE <= u32::MAX as usize);

pub(crate) const NAME_OFFSET: usize = 0;
pub(crate) const ADDRESS_OFFSET: usize = NAME_OFFSET + NAME_LEN;
pub(crate) const HOURS_OFFSET: usize = ADDRESS_OFFSET + ADDRESS_LEN;
