//! Plumbing command implementations
//!
//! Each command is an `impl Repository` block that drives the object database and
//! the index and reports through the repository's writers:
//!
//! - `init-db`: Create the metadata and fan-out directories
//! - `update-cache`: Stage file contents and stat metadata
//! - `write-tree`: Turn the index into a tree object
//! - `read-tree`: List a tree object
//! - `commit-tree`: Create a commit object for a tree
//! - `cat-file`: Extract an object's payload into a temporary file
//! - `show-diff`: Compare the index against the working tree

pub mod cat_file;
pub mod commit_tree;
pub mod init_db;
pub mod read_tree;
pub mod show_diff;
pub mod update_cache;
pub mod write_tree;
