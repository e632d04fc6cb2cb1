//! Object types and encodings
//!
//! Every object is stored as the compressed form of `<type> <size>\0<content>`.
//! The database itself only cares about that framing; the payload encodings of
//! trees and commits are layered on top:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Flat listing of staged files (mode, name and object ID)
//! - **Commit**: Tree, parents, identities and message

pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod stored_object;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in raw bytes
pub const OBJECT_ID_RAW_LENGTH: usize = 20;
