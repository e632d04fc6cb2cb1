//! Index entry representation
//!
//! Each entry in the index represents a staged file with:
//! - File name relative to the repository root
//! - Content hash (object ID)
//! - Stat metadata (timestamps, device, inode, mode, owner, size)
//!
//! ## Entry Format
//!
//! ```text
//!   0  ctime sec      4  ctime nsec     8  mtime sec     12  mtime nsec
//!  16  dev           20  ino           24  mode          28  uid
//!  32  gid           36  size          40  sha1 (20)     60  name length (2)
//!  62  name, then NUL padding up to entry_size(name length)
//! ```
//!
//! Entries are immutable; re-staging a file builds a new entry.

use crate::artifacts::index::change_flags::ChangeFlags;
use crate::artifacts::index::entry_size;
use crate::artifacts::index::file_stat::{FileStat, Timestamp};
use crate::artifacts::objects::object::Packable;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use byteorder::{ByteOrder, NetworkEndian};
use bytes::{BufMut, Bytes, BytesMut};

/// Size of the fixed part of an entry, before the name
pub const ENTRY_BASE_SIZE: usize = 62;

/// Longest name the 16-bit length field can describe
pub const MAX_NAME_LENGTH: usize = u16::MAX as usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    stat: FileStat,
    oid: ObjectId,
    name: Vec<u8>,
}

impl IndexEntry {
    /// Capture a staged file from its stat snapshot and content hash
    ///
    /// # Errors
    ///
    /// [`Error::CorruptEntry`] if the name has an embedded NUL or is too long
    /// for the length field.
    pub fn from_stat(name: impl Into<Vec<u8>>, stat: &FileStat, oid: ObjectId) -> Result<Self> {
        let name = name.into();

        if name.len() > MAX_NAME_LENGTH {
            return Err(Error::CorruptEntry(format!(
                "name is {} bytes long, at most {MAX_NAME_LENGTH} allowed",
                name.len()
            )));
        }
        if name.contains(&0) {
            return Err(Error::CorruptEntry(format!(
                "name {:?} contains a NUL byte",
                String::from_utf8_lossy(&name)
            )));
        }

        Ok(IndexEntry {
            stat: *stat,
            oid,
            name,
        })
    }

    /// Decode the entry starting at `offset`
    ///
    /// Returns the entry and the offset of the record that follows it.
    pub fn parse(buffer: &[u8], offset: usize) -> Result<(Self, usize)> {
        let remaining = buffer.len().saturating_sub(offset);
        if remaining < ENTRY_BASE_SIZE {
            return Err(Error::CorruptEntry(format!(
                "{remaining} bytes left at offset {offset}, need {ENTRY_BASE_SIZE}"
            )));
        }

        let bytes = &buffer[offset..];
        let field = |index: usize| NetworkEndian::read_u32(&bytes[index * 4..index * 4 + 4]);

        let stat = FileStat {
            ctime: Timestamp::new(field(0), field(1)),
            mtime: Timestamp::new(field(2), field(3)),
            dev: field(4),
            ino: field(5),
            mode: field(6),
            uid: field(7),
            gid: field(8),
            size: field(9),
        };
        let oid = ObjectId::from_slice(&bytes[40..60])
            .ok_or_else(|| Error::CorruptEntry(format!("bad hash at offset {offset}")))?;
        let name_length = NetworkEndian::read_u16(&bytes[60..62]) as usize;

        if bytes.len() < ENTRY_BASE_SIZE + name_length {
            return Err(Error::CorruptEntry(format!(
                "incomplete entry at offset {offset}: name needs {name_length} bytes, {} left",
                bytes.len() - ENTRY_BASE_SIZE
            )));
        }
        let name = &bytes[ENTRY_BASE_SIZE..ENTRY_BASE_SIZE + name_length];
        if name.contains(&0) {
            return Err(Error::CorruptEntry(format!(
                "NUL byte in entry name at offset {offset}"
            )));
        }

        let entry = IndexEntry {
            stat,
            oid,
            name: name.to_vec(),
        };

        Ok((entry, offset + entry_size(name_length)))
    }

    pub fn name(&self) -> &[u8] {
        &self.name
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    pub fn mode(&self) -> u32 {
        self.stat.mode
    }

    pub fn serialized_size(&self) -> usize {
        entry_size(self.name.len())
    }

    /// Compare the recorded metadata with a fresh stat snapshot
    pub fn detect_changes(&self, stat: &FileStat) -> ChangeFlags {
        let mut changed = ChangeFlags::empty();

        if self.stat.mtime != stat.mtime {
            changed |= ChangeFlags::MTIME;
        }
        if self.stat.ctime != stat.ctime {
            changed |= ChangeFlags::CTIME;
        }
        if self.stat.uid != stat.uid || self.stat.gid != stat.gid {
            changed |= ChangeFlags::OWNER;
        }
        if self.stat.mode != stat.mode {
            changed |= ChangeFlags::MODE;
        }
        if self.stat.dev != stat.dev || self.stat.ino != stat.ino {
            changed |= ChangeFlags::INODE;
        }
        if self.stat.size != stat.size {
            changed |= ChangeFlags::DATA;
        }

        changed
    }
}

impl Packable for IndexEntry {
    fn serialize(&self) -> Bytes {
        let size = self.serialized_size();
        let mut entry_bytes = BytesMut::with_capacity(size);

        entry_bytes.put_u32(self.stat.ctime.sec);
        entry_bytes.put_u32(self.stat.ctime.nsec);
        entry_bytes.put_u32(self.stat.mtime.sec);
        entry_bytes.put_u32(self.stat.mtime.nsec);
        entry_bytes.put_u32(self.stat.dev);
        entry_bytes.put_u32(self.stat.ino);
        entry_bytes.put_u32(self.stat.mode);
        entry_bytes.put_u32(self.stat.uid);
        entry_bytes.put_u32(self.stat.gid);
        entry_bytes.put_u32(self.stat.size);
        entry_bytes.put_slice(self.oid.as_bytes());
        entry_bytes.put_u16(self.name.len() as u16);
        entry_bytes.put_slice(&self.name);

        // at least one NUL always follows the name
        entry_bytes.resize(size, 0);

        entry_bytes.freeze()
    }
}
