//! A minimal version-control storage engine
//!
//! Two independent stores sit at the core, both keyed by SHA-1 [`ObjectId`]s:
//!
//! - [`Database`]: content-addressable object files, zlib-compressed and fanned
//!   out over 256 directories.
//! - [`Index`]: the checksummed staging file listing every staged file's stat
//!   metadata and content hash, committed atomically through a lock file.
//!
//! The plumbing commands in [`commands`] combine them into a small CLI.
//!
//! [`ObjectId`]: artifacts::objects::object_id::ObjectId
//! [`Database`]: areas::database::Database
//! [`Index`]: areas::index::Index

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
