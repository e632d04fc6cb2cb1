//! Object database
//!
//! Content-addressable, append-only store of typed objects. Each object is kept
//! zlib-compressed at `<objects>/<hex[0..2]>/<hex[2..]>`.
//!
//! The object ID is the SHA-1 of the *compressed* file bytes, not of the plain
//! content, so it identifies exactly what sits on disk. Files are created with
//! create-only semantics and never rewritten, which makes concurrent writers of the
//! same content converge on one file without locking. Objects are written to a
//! temporary file in their fan-out directory first, so an interrupted write never
//! leaves a truncated object behind.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::stored_object::StoredObject;
use crate::errors::{Error, Result};
use bytes::Bytes;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

/// zlib level used for every object
const COMPRESSION_LEVEL: u32 = 9;
const TEMP_OBJECT_PREFIX: &str = "tmp_obj_";

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    /// Store `payload` under the given type label
    ///
    /// Writing an object that already exists is a successful no-op.
    pub fn store_raw(&self, object_type: &str, payload: &[u8]) -> Result<ObjectId> {
        let content = StoredObject::frame(object_type, payload);
        let compressed = Self::compress(&content)?;
        let object_id = ObjectId::digest(&compressed);

        let object_path = self.object_path(&object_id);
        if object_path.is_file() {
            tracing::trace!(%object_id, "object already stored");
            return Ok(object_id);
        }

        self.write_object(&object_path, &compressed)?;
        tracing::debug!(%object_id, object_type, size = payload.len(), "stored object");

        Ok(object_id)
    }

    /// Load and decode an object
    pub fn read(&self, object_id: &ObjectId) -> Result<StoredObject> {
        let object_path = self.object_path(object_id);

        let compressed = match std::fs::read(&object_path) {
            Ok(compressed) => compressed,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound(*object_id));
            }
            Err(error) => return Err(Error::io("read", object_path, error)),
        };

        let content = Self::decompress(&compressed).map_err(|_| Error::CorruptObject {
            oid: *object_id,
            reason: "unable to inflate object",
        })?;

        StoredObject::unframe(object_id, content)
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.object_path(object_id).is_file()
    }

    /// Write the object under a temporary name, then link it into place
    ///
    /// The final path only ever holds complete objects, and an existing file there
    /// is never replaced. Losing a creation race to another writer counts as
    /// success, since the winner wrote identical bytes.
    fn write_object(&self, object_path: &Path, compressed: &[u8]) -> Result<()> {
        let object_dir = object_path.parent().unwrap_or(&self.path);
        std::fs::create_dir_all(object_dir)
            .map_err(|error| Error::io("create object directory", object_dir, error))?;

        // removed on drop unless persisted
        let mut temp_object = tempfile::Builder::new()
            .prefix(TEMP_OBJECT_PREFIX)
            .tempfile_in(object_dir)
            .map_err(|error| Error::io("create temporary object", object_dir, error))?;
        temp_object
            .write_all(compressed)
            .map_err(|error| Error::io("write temporary object", temp_object.path(), error))?;

        match temp_object.persist_noclobber(object_path) {
            Ok(_) => Ok(()),
            Err(error) if error.error.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(error) => Err(Error::io("move object into place", object_path, error.error)),
        }
    }

    fn compress(data: &[u8]) -> Result<Vec<u8>> {
        let mut encoder = flate2::write::ZlibEncoder::new(
            Vec::new(),
            flate2::Compression::new(COMPRESSION_LEVEL),
        );

        encoder
            .write_all(data)
            .map_err(|error| Error::io("compress object", PathBuf::new(), error))?;

        encoder
            .finish()
            .map_err(|error| Error::io("compress object", PathBuf::new(), error))
    }

    fn decompress(data: &[u8]) -> std::io::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(data);
        let mut decompressed_content = Vec::new();
        decoder.read_to_end(&mut decompressed_content)?;

        Ok(decompressed_content.into())
    }
}
