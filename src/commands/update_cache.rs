use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::areas::workspace::FileState;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::index::path_validator::is_valid_path;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Stage each path's current content, or unstage it if the file is gone
    ///
    /// Invalid names are reported and skipped. The index is saved once at the end.
    pub fn update_cache(&mut self, paths: &[String]) -> anyhow::Result<()> {
        let mut index = self.load_index()?;

        for path in paths {
            if !is_valid_path(path) {
                tracing::debug!(path, "ignoring invalid path");
                writeln!(self.error_writer(), "Ignoring path {path}")?;
                continue;
            }

            self.stage_path(&mut index, path)?;
        }

        index.save().context("Unable to save the index")?;

        Ok(())
    }

    fn stage_path(&self, index: &mut Index, path: &str) -> anyhow::Result<()> {
        let stat = match self.workspace().stat_file(path)? {
            FileState::Missing => {
                index.remove(path.as_bytes())?;
                return Ok(());
            }
            FileState::NotRegular => anyhow::bail!("{path} is not a regular file"),
            FileState::Regular(stat) => stat,
        };

        let data = self.workspace().read_file(path)?;
        let object_id = self
            .database()
            .store_raw(ObjectType::Blob.as_str(), &data)
            .with_context(|| format!("Unable to store {path}"))?;

        index.add_or_update(IndexEntry::from_stat(path, &stat, object_id)?)?;

        Ok(())
    }
}
