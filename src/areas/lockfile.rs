//! Lock file for atomic index commits
//!
//! A commit to `<path>` goes through `<path>.lock`: the lock is created with
//! create-only semantics, written in full, then renamed over `<path>`. Readers see
//! either the old file or the new one. A lock that is dropped without being
//! committed is removed again, so a failed commit never blocks the next one.

use crate::errors::{Error, Result};
use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

const LOCK_EXTENSION: &str = "lock";

#[derive(Debug)]
pub struct Lockfile {
    file_path: PathBuf,
    lock_path: PathBuf,
    lock: Option<File>,
}

impl Lockfile {
    /// Lock path for `file_path`: the same path with `.lock` appended
    pub fn lock_path_for(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.as_os_str().to_owned();
        lock_path.push(".");
        lock_path.push(LOCK_EXTENSION);
        PathBuf::from(lock_path)
    }

    /// Take the lock for `file_path`
    ///
    /// # Errors
    ///
    /// [`Error::Lock`] if another commit holds the lock.
    pub fn acquire(file_path: &Path) -> Result<Self> {
        let lock_path = Self::lock_path_for(file_path);

        let lock = match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&lock_path)
        {
            Ok(lock) => lock,
            Err(error) if error.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!(lock = %lock_path.display(), "lock already held");
                return Err(Error::Lock {
                    reason: "unable to create new cachefile",
                    path: lock_path,
                });
            }
            Err(error) => return Err(Error::io("create lock file", lock_path, error)),
        };

        Ok(Lockfile {
            file_path: file_path.to_path_buf(),
            lock_path,
            lock: Some(lock),
        })
    }

    pub fn write(&mut self, data: &[u8]) -> Result<()> {
        let lock = self.lock.as_mut().ok_or_else(|| Error::Lock {
            reason: "lock file already released",
            path: self.lock_path.clone(),
        })?;

        lock.write_all(data)
            .map_err(|error| Error::io("write lock file", &self.lock_path, error))
    }

    /// Close the lock and move it over the real file
    pub fn commit(mut self) -> Result<()> {
        // close before renaming
        drop(self.lock.take());

        if let Err(error) = std::fs::rename(&self.lock_path, &self.file_path) {
            tracing::warn!(
                %error,
                lock = %self.lock_path.display(),
                "unable to move lock into place"
            );
            return Err(Error::Lock {
                reason: "unable to move new cachefile into place",
                path: self.lock_path.clone(),
            });
        }

        self.lock_path.clear();
        Ok(())
    }
}

impl Drop for Lockfile {
    fn drop(&mut self) {
        drop(self.lock.take());

        // an empty path marks a committed lock
        if !self.lock_path.as_os_str().is_empty() {
            let _ = std::fs::remove_file(&self.lock_path);
        }
    }
}
