//! Index file format
//!
//! The index (also called staging area or cache) records the stat metadata and content
//! hash of every file staged for the next tree.
//!
//! ## File Format (Version 1)
//!
//! ```text
//! Header (32 bytes):
//!   - Signature: "DIRC" (4 bytes)
//!   - Version: 1 (4 bytes)
//!   - Entry count (4 bytes)
//!   - SHA-1 of the first 12 header bytes followed by all entries (20 bytes)
//!
//! Entries (variable length):
//!   - 62 fixed bytes, then the name
//!   - Each entry zero padded to a multiple of 8 bytes
//! ```
//!
//! All integers are big-endian.

use std::cmp::Ordering;

pub mod change_flags;
pub mod checksum;
pub mod file_stat;
pub mod index_entry;
pub mod index_header;
pub mod path_validator;

/// Size of SHA-1 checksum in bytes
pub const CHECKSUM_SIZE: usize = 20;

/// Size of the checksummed part of the header: marker, version, entries_count
pub const HEADER_SIZE: usize = 12;

/// Offset of the first entry record
pub const ENTRIES_OFFSET: usize = HEADER_SIZE + CHECKSUM_SIZE;

/// Magic signature identifying index files
pub const SIGNATURE: &str = "DIRC";

/// Index file format version
pub const VERSION: u32 = 1;

/// On-disk size of an entry record for a name of `name_length` bytes
///
/// Always leaves at least one trailing NUL, so a name whose record would end
/// exactly on a block boundary gets a full extra block of padding.
pub const fn entry_size(name_length: usize) -> usize {
    (index_entry::ENTRY_BASE_SIZE + name_length + 8) & !7
}

/// Index ordering of entry names
///
/// Byte-wise over the common prefix; on a tie the shorter name sorts first.
pub fn compare_names(a: &[u8], b: &[u8]) -> Ordering {
    let len = a.len().min(b.len());

    match a[..len].cmp(&b[..len]) {
        Ordering::Equal => a.len().cmp(&b.len()),
        ordering => ordering,
    }
}

/// Outcome of looking a name up in the sorted entry list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// An entry with this name sits at the index
    Found(usize),
    /// No such entry; inserting at the index keeps the list sorted
    Insert(usize),
}
