//! Index (staging area)
//!
//! The index records which files go into the next tree, along with their stat
//! metadata and content hashes.
//!
//! ## Lifecycle
//!
//! An `Index` starts unloaded. [`Index::load`] reads the file (a missing file is an
//! empty index); mutations then change the in-memory entries only, and
//! [`Index::save`] commits them through `<index>.lock`. Accessors load on first use.
//!
//! Loading takes no lock. Saving fails with [`Error::Lock`] while another commit
//! holds the lock; callers retry once it is gone. Concurrent commits are
//! last-writer-wins.

use crate::areas::lockfile::Lockfile;
use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::index::{
    ENTRIES_OFFSET, HEADER_SIZE, Position, VERSION, compare_names, entry_size,
};
use crate::artifacts::objects::object::Packable;
use crate::errors::{Error, Result};
use bytes::{BufMut, BytesMut};
use std::io::ErrorKind;
use std::path::Path;

/// Staging index
///
/// Entries are kept strictly ascending by name (see [`compare_names`]), without
/// duplicates.
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.dircache/index`)
    path: Box<Path>,
    /// Staged files, sorted by name
    entries: Vec<IndexEntry>,
    /// Whether `entries` reflects a load of the file
    loaded: bool,
}

impl Index {
    /// Create a new unloaded index
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the index file (typically `.dircache/index`)
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: Vec::new(),
            loaded: false,
        }
    }

    /// Get the path to the index file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Load the index from disk
    ///
    /// Replaces any in-memory entries. If the file doesn't exist the index is
    /// empty. On failure the in-memory state is left as it was.
    pub fn load(&mut self) -> Result<()> {
        let buffer = match std::fs::read(&self.path) {
            Ok(buffer) => buffer,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::debug!(index = %self.path.display(), "no index file, starting empty");
                self.entries.clear();
                self.loaded = true;
                return Ok(());
            }
            Err(error) => return Err(Error::io("read index", self.path.to_path_buf(), error)),
        };

        self.entries = Self::parse(&buffer)?;
        self.loaded = true;
        tracing::debug!(index = %self.path.display(), entries = self.entries.len(), "loaded index");

        Ok(())
    }

    fn parse(buffer: &[u8]) -> Result<Vec<IndexEntry>> {
        if buffer.len() < ENTRIES_OFFSET {
            return Err(Error::Integrity("cache corrupted"));
        }

        let header = IndexHeader::read(buffer).ok_or(Error::Integrity("cache corrupted"))?;
        if !header.has_signature() {
            return Err(Error::Integrity("bad signature"));
        }
        if header.version != VERSION {
            return Err(Error::Integrity("bad version"));
        }

        let mut checksum = Checksum::new();
        checksum.update(&buffer[..HEADER_SIZE]);
        checksum.update(&buffer[ENTRIES_OFFSET..]);
        if !checksum.verify(&buffer[HEADER_SIZE..ENTRIES_OFFSET]) {
            return Err(Error::Integrity("bad header sha1"));
        }

        // the count is untrusted; no more entries fit than minimal records
        let fitting = (buffer.len() - ENTRIES_OFFSET) / entry_size(0);
        let mut entries = Vec::with_capacity(fitting.min(header.entries_count as usize));
        let mut offset = ENTRIES_OFFSET;
        for _ in 0..header.entries_count {
            let (entry, next_offset) = IndexEntry::parse(buffer, offset)?;
            if next_offset > buffer.len() {
                return Err(Error::CorruptEntry(format!(
                    "entry at offset {offset} runs past the end of the index"
                )));
            }

            entries.push(entry);
            offset = next_offset;
        }

        Ok(entries)
    }

    /// Commit the in-memory entries to disk
    ///
    /// Writes the whole file to `<index>.lock` and renames it over the index.
    /// The previous index stays intact if anything fails.
    pub fn save(&mut self) -> Result<()> {
        self.ensure_loaded()?;

        let data = self.serialize();

        if let Some(index_dir) = self.path.parent() {
            std::fs::create_dir_all(index_dir)
                .map_err(|error| Error::io("create index directory", index_dir, error))?;
        }

        let mut lock = Lockfile::acquire(&self.path)?;
        lock.write(&data)?;
        lock.commit()?;

        tracing::debug!(index = %self.path.display(), entries = self.entries.len(), "saved index");

        Ok(())
    }

    fn serialize(&self) -> BytesMut {
        let header = IndexHeader::for_entries(self.entries.len() as u32).serialize();
        let entry_bytes = self
            .entries
            .iter()
            .map(|entry| entry.serialize())
            .collect::<Vec<_>>();

        let mut checksum = Checksum::new();
        checksum.update(&header);
        entry_bytes.iter().for_each(|bytes| checksum.update(bytes));

        let entries_size = entry_bytes.iter().map(|bytes| bytes.len()).sum::<usize>();
        let mut data = BytesMut::with_capacity(ENTRIES_OFFSET + entries_size);
        data.put_slice(&header);
        data.put_slice(&checksum.finish());
        entry_bytes.iter().for_each(|bytes| data.put_slice(bytes));

        data
    }

    /// Insert `entry`, or replace the entry with the same name in place
    pub fn add_or_update(&mut self, entry: IndexEntry) -> Result<()> {
        self.ensure_loaded()?;

        match self.find_position(entry.name()) {
            Position::Found(index) => self.entries[index] = entry,
            Position::Insert(index) => self.entries.insert(index, entry),
        }

        Ok(())
    }

    /// Drop the entry named `name`; unknown names are ignored
    pub fn remove(&mut self, name: &[u8]) -> Result<()> {
        self.ensure_loaded()?;

        if let Position::Found(index) = self.find_position(name) {
            self.entries.remove(index);
        }

        Ok(())
    }

    pub fn entries(&mut self) -> Result<&[IndexEntry]> {
        self.ensure_loaded()?;
        Ok(&self.entries)
    }

    pub fn count(&mut self) -> Result<usize> {
        self.ensure_loaded()?;
        Ok(self.entries.len())
    }

    /// Look up an entry by its name
    pub fn entry_by_name(&mut self, name: &[u8]) -> Result<Option<&IndexEntry>> {
        self.ensure_loaded()?;

        Ok(match self.find_position(name) {
            Position::Found(index) => self.entries.get(index),
            Position::Insert(_) => None,
        })
    }

    fn ensure_loaded(&mut self) -> Result<()> {
        if !self.loaded {
            self.load()?;
        }

        Ok(())
    }

    fn find_position(&self, name: &[u8]) -> Position {
        match self
            .entries
            .binary_search_by(|entry| compare_names(entry.name(), name))
        {
            Ok(index) => Position::Found(index),
            Err(index) => Position::Insert(index),
        }
    }
}
