//! Tree object
//!
//! A tree is a flat snapshot of the index: one entry per staged file, in index order.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<octal mode> <name>\0<20-byte-sha1>`

use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::OBJECT_ID_RAW_LENGTH;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::anyhow;
use bytes::{BufMut, Bytes, BytesMut};
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub mode: u32,
    pub name: Vec<u8>,
    pub oid: ObjectId,
}

impl TreeEntry {
    /// Render as `<octal mode> <name> (<hex>)`
    pub fn display(&self) -> String {
        format!(
            "{:o} {} ({})",
            self.mode,
            String::from_utf8_lossy(&self.name),
            self.oid
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn from_index_entries<'e>(entries: impl IntoIterator<Item = &'e IndexEntry>) -> Self {
        Tree {
            entries: entries
                .into_iter()
                .map(|entry| TreeEntry::new(entry.mode(), entry.name().to_vec(), *entry.oid()))
                .collect(),
        }
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }
}

impl Packable for Tree {
    fn serialize(&self) -> Bytes {
        let mut tree_bytes = BytesMut::new();

        for entry in &self.entries {
            tree_bytes.put_slice(format!("{:o} ", entry.mode).as_bytes());
            tree_bytes.put_slice(&entry.name);
            tree_bytes.put_u8(0);
            tree_bytes.put_slice(entry.oid.as_bytes());
        }

        tree_bytes.freeze()
    }
}

impl Unpackable for Tree {
    fn deserialize(bytes: Bytes) -> anyhow::Result<Self> {
        let mut entries = Vec::new();
        let mut rest = &bytes[..];

        while !rest.is_empty() {
            let space = rest
                .iter()
                .position(|&b| b == b' ')
                .ok_or_else(|| anyhow!("corrupt tree entry"))?;
            let mode = std::str::from_utf8(&rest[..space])
                .ok()
                .and_then(|mode| u32::from_str_radix(mode, 8).ok())
                .ok_or_else(|| anyhow!("corrupt tree entry"))?;
            rest = &rest[space + 1..];

            let nul = rest
                .iter()
                .position(|&b| b == 0)
                .ok_or_else(|| anyhow!("corrupt tree entry"))?;
            let name = rest[..nul].to_vec();
            rest = &rest[nul + 1..];

            if rest.len() < OBJECT_ID_RAW_LENGTH {
                return Err(anyhow!("corrupt tree entry"));
            }
            let oid = ObjectId::from_slice(&rest[..OBJECT_ID_RAW_LENGTH])
                .ok_or_else(|| anyhow!("corrupt tree entry"))?;
            rest = &rest[OBJECT_ID_RAW_LENGTH..];

            entries.push(TreeEntry::new(mode, name, oid));
        }

        Ok(Tree { entries })
    }
}
