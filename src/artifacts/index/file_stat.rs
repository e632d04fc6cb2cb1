//! Stat snapshot of a working file
//!
//! The index stores every field as an unsigned 32-bit integer, so wider platform
//! values are truncated when the snapshot is taken. Comparing a fresh snapshot
//! against the stored one is how changes are detected without reading content.

use std::fs::Metadata;

/// Seconds and nanoseconds of a file timestamp
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timestamp {
    pub sec: u32,
    pub nsec: u32,
}

impl Timestamp {
    pub fn new(sec: u32, nsec: u32) -> Self {
        Timestamp { sec, nsec }
    }
}

/// Typed stat record
///
/// ## Timestamps
///
/// - `ctime`: File status change time (inode modification)
/// - `mtime`: File content modification time
///
/// Platforms without sub-second precision report `nsec` as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStat {
    pub ctime: Timestamp,
    pub mtime: Timestamp,
    /// Device ID
    pub dev: u32,
    /// Inode number
    pub ino: u32,
    /// Raw `st_mode` (file type and permission bits)
    pub mode: u32,
    /// User ID of owner
    pub uid: u32,
    /// Group ID of owner
    pub gid: u32,
    /// File size in bytes
    pub size: u32,
}

#[cfg(unix)]
impl From<&Metadata> for FileStat {
    fn from(metadata: &Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;

        FileStat {
            ctime: Timestamp::new(metadata.ctime() as u32, metadata.ctime_nsec() as u32),
            mtime: Timestamp::new(metadata.mtime() as u32, metadata.mtime_nsec() as u32),
            dev: metadata.dev() as u32,
            ino: metadata.ino() as u32,
            mode: metadata.mode(),
            uid: metadata.uid(),
            gid: metadata.gid(),
            size: metadata.size() as u32,
        }
    }
}

#[cfg(not(unix))]
impl From<&Metadata> for FileStat {
    fn from(metadata: &Metadata) -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};

        let timestamp = |time: std::io::Result<SystemTime>| {
            time.ok()
                .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
                .map(|since| Timestamp::new(since.as_secs() as u32, since.subsec_nanos()))
                .unwrap_or_default()
        };
        let mode = if metadata.permissions().readonly() {
            0o100444
        } else {
            0o100644
        };

        FileStat {
            ctime: timestamp(metadata.created()),
            mtime: timestamp(metadata.modified()),
            mode,
            size: metadata.len() as u32,
            ..Default::default()
        }
    }
}
