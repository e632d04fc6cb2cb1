//! Core repository components
//!
//! - `database`: Object database for storing blobs, trees, and commits
//! - `index`: Staging area (index/cache) for tracking file changes
//! - `lockfile`: Create-then-rename commits of the index file
//! - `repository`: Path layout and output streams shared by the commands
//! - `workspace`: Working directory file system operations

pub mod database;
pub mod index;
pub mod lockfile;
pub mod repository;
pub mod workspace;
