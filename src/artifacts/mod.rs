//! On-disk data structures
//!
//! - `index`: Index file header, entries, checksum and path rules
//! - `objects`: Object IDs, object framing, tree and commit encodings

pub mod index;
pub mod objects;
