use crate::artifacts::index::file_stat::FileStat;
use anyhow::Context;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Working tree: files addressed by their index name, relative to the root
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

/// What the working tree holds at a given name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    Missing,
    NotRegular,
    Regular(FileStat),
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn file_path(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    pub fn read_file(&self, name: &str) -> anyhow::Result<Vec<u8>> {
        let file_path = self.file_path(name);

        std::fs::read(&file_path).with_context(|| format!("Unable to read {}", file_path.display()))
    }

    /// Stat `name`, following symlinks
    pub fn stat_file(&self, name: &str) -> anyhow::Result<FileState> {
        let file_path = self.file_path(name);

        match std::fs::metadata(&file_path) {
            Ok(metadata) if metadata.is_file() => Ok(FileState::Regular(FileStat::from(&metadata))),
            Ok(_) => Ok(FileState::NotRegular),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(FileState::Missing),
            Err(error) => {
                Err(error).with_context(|| format!("Unable to stat {}", file_path.display()))
            }
        }
    }
}
