//! Framed object content
//!
//! An object's decompressed content is `<type> <size>\0<payload>`, where `size`
//! is the decimal byte length of `payload`.

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use bytes::{BufMut, Bytes, BytesMut};

/// A decoded object: its type label, declared size and payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub object_type: String,
    pub size: usize,
    pub data: Bytes,
}

impl StoredObject {
    /// Prefix `payload` with the `<type> <size>\0` header
    pub fn frame(object_type: &str, payload: &[u8]) -> Bytes {
        let header = format!("{} {}", object_type, payload.len());

        let mut content = BytesMut::with_capacity(header.len() + 1 + payload.len());
        content.put_slice(header.as_bytes());
        content.put_u8(0);
        content.put_slice(payload);

        content.freeze()
    }

    /// Split decompressed content back into header fields and payload
    ///
    /// `oid` only labels the error.
    pub fn unframe(oid: &ObjectId, content: Bytes) -> Result<Self> {
        let corrupt = |reason| Error::CorruptObject { oid: *oid, reason };

        let separator = content
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| corrupt("missing header separator"))?;
        let header = std::str::from_utf8(&content[..separator])
            .map_err(|_| corrupt("corrupt object header"))?;

        let (object_type, size) = header
            .split_once(' ')
            .ok_or_else(|| corrupt("corrupt object header"))?;
        let size = size
            .parse::<usize>()
            .map_err(|_| corrupt("invalid object size"))?;

        let data = content.slice(separator + 1..);
        if size != data.len() {
            return Err(corrupt("invalid object size"));
        }

        Ok(StoredObject {
            object_type: object_type.to_string(),
            size,
            data,
        })
    }
}
