//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 20 raw bytes, usually shown as 40 lowercase hexadecimal characters.
//! They address every object in the database (blobs, trees, commits).
//!
//! ## Storage
//!
//! Objects are stored in `objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::{OBJECT_ID_LENGTH, OBJECT_ID_RAW_LENGTH};
use crate::errors::{Error, Result};
use sha1::{Digest, Sha1};
use std::path::PathBuf;

/// Object identifier
///
/// Holds the raw digest; the hex form is derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId([u8; OBJECT_ID_RAW_LENGTH]);

impl ObjectId {
    pub fn new(raw: [u8; OBJECT_ID_RAW_LENGTH]) -> Self {
        ObjectId(raw)
    }

    /// Hash arbitrary bytes with SHA-1
    pub fn digest(data: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(data);
        ObjectId(hasher.finalize().into())
    }

    /// Parse and validate an object ID from its hex form
    ///
    /// Surrounding whitespace is ignored and upper-case digits are accepted.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidHash`] if the text is not exactly 40 hex digits.
    pub fn try_parse(id: &str) -> Result<Self> {
        let id = id.trim();
        if id.len() != OBJECT_ID_LENGTH {
            return Err(Error::InvalidHash(format!(
                "expected {OBJECT_ID_LENGTH} characters, got {}",
                id.len()
            )));
        }

        let mut raw = [0u8; OBJECT_ID_RAW_LENGTH];
        hex::decode_to_slice(id, &mut raw).map_err(|_| Error::InvalidHash(id.to_string()))?;

        Ok(ObjectId(raw))
    }

    /// Read an object ID from a slice holding exactly 20 raw bytes
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; OBJECT_ID_RAW_LENGTH]>::try_from(bytes).ok().map(ObjectId)
    }

    pub fn as_bytes(&self) -> &[u8; OBJECT_ID_RAW_LENGTH] {
        &self.0
    }

    /// 40 lowercase hex characters
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Convert to file system path for object storage
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    /// For example, `abc123...` becomes `ab/c123...`
    pub fn to_path(&self) -> PathBuf {
        let hex = self.to_hex();
        let (dir, file) = hex.split_at(2);
        PathBuf::from(dir).join(file)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
