use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::object::Packable;
use byteorder::{ByteOrder, NetworkEndian};
use bytes::{BufMut, Bytes, BytesMut};
use derive_new::new;

/// The checksummed first 12 bytes of the index file
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexHeader {
    pub(crate) marker: [u8; 4],
    pub(crate) version: u32,
    pub(crate) entries_count: u32,
}

impl IndexHeader {
    pub(crate) fn for_entries(entries_count: u32) -> Self {
        let mut marker = [0u8; 4];
        marker.copy_from_slice(SIGNATURE.as_bytes());

        IndexHeader {
            marker,
            version: VERSION,
            entries_count,
        }
    }

    /// Read the header fields from the start of `bytes`
    ///
    /// Returns `None` when fewer than 12 bytes are available. No field is validated.
    pub(crate) fn read(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < HEADER_SIZE {
            return None;
        }

        let mut marker = [0u8; 4];
        marker.copy_from_slice(&bytes[0..4]);

        Some(IndexHeader {
            marker,
            version: NetworkEndian::read_u32(&bytes[4..8]),
            entries_count: NetworkEndian::read_u32(&bytes[8..12]),
        })
    }

    pub(crate) fn has_signature(&self) -> bool {
        self.marker == SIGNATURE.as_bytes()
    }
}

impl Packable for IndexHeader {
    fn serialize(&self) -> Bytes {
        let mut bytes = BytesMut::with_capacity(HEADER_SIZE);
        bytes.put_slice(&self.marker);
        bytes.put_u32(self.version);
        bytes.put_u32(self.entries_count);

        bytes.freeze()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_layout() {
        let bytes = IndexHeader::for_entries(3).serialize();
        pretty_assertions::assert_eq!(&bytes[..], b"DIRC\0\0\0\x01\0\0\0\x03");
    }

    #[test]
    fn read_returns_fields_without_validation() {
        let header = IndexHeader::read(b"XXXX\0\0\0\x07\0\0\x01\0trailing").unwrap();

        pretty_assertions::assert_eq!(header, IndexHeader::new(*b"XXXX", 7, 256));
        assert!(!header.has_signature());
    }

    #[test]
    fn read_needs_twelve_bytes() {
        assert!(IndexHeader::read(b"DIRC\0\0\0\x01").is_none());
    }
}
