//! Error types for the object database and the index
//!
//! Every fallible operation of the storage core returns [`Result`]. The CLI layer
//! wraps these in `anyhow` with extra context.

use crate::artifacts::objects::object_id::ObjectId;
use std::path::PathBuf;

/// Failures raised by the object database and the index.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No object file exists for the requested hash.
    #[error("object {0} not found")]
    NotFound(ObjectId),

    /// The object file exists but its bytes are malformed.
    #[error("corrupt object {oid}: {reason}")]
    CorruptObject { oid: ObjectId, reason: &'static str },

    /// An index entry record is truncated or malformed.
    #[error("corrupt index entry: {0}")]
    CorruptEntry(String),

    /// The index file failed a header or checksum check.
    #[error("{0}")]
    Integrity(&'static str),

    /// A filesystem read, write, mkdir or rename failed.
    #[error("unable to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The index lock is held by someone else, or it could not be moved into place.
    #[error("{reason} ({path})")]
    Lock { reason: &'static str, path: PathBuf },

    /// Malformed hex input.
    #[error("invalid object id: {0}")]
    InvalidHash(String),
}

impl Error {
    pub(crate) fn io(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Error::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Result alias for storage operations.
pub type Result<T> = std::result::Result<T, Error>;
